use std::path::PathBuf;

use crate::config::Settings;
use crate::domain::models::{RenamePlanEntry, RunSummary, Side, SubtitleIndex};
use crate::error::MatchError;
use crate::infra::fs::FileSystem;
use crate::report::{Event, Reporter};
use crate::workflows::matcher::EpisodePattern;

/// Match every video in `settings.location` to a subtitle by episode and
/// rename it (or only report the rename when not committing).
pub fn run(
    settings: &Settings,
    fs: &dyn FileSystem,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, MatchError> {
    // Both patterns are checked before any file is touched.
    if settings.subtitle_pattern.is_empty() || settings.video_pattern.is_empty() {
        return Err(MatchError::MissingPattern);
    }
    let subtitle_pattern = EpisodePattern::new(Side::Subtitle, &settings.subtitle_pattern)?;
    let video_pattern = EpisodePattern::new(Side::Video, &settings.video_pattern)?;

    let subtitles = fs.list_files(&settings.location, &settings.subtitle_ext);
    let videos = fs.list_files(&settings.location, &settings.video_ext);
    reporter.event(Event::Found {
        videos: videos.len(),
        video_ext: settings.video_ext.clone(),
        subtitles: subtitles.len(),
        subtitle_ext: settings.subtitle_ext.clone(),
    })?;
    if videos.is_empty() {
        return Err(MatchError::NoVideos);
    }

    let index = build_index(subtitles, &subtitle_pattern, reporter)?;
    if index.is_empty() {
        return Err(MatchError::NoSubtitlesMatched);
    }
    tracing::info!(episodes = index.len(), "Indexed subtitles");

    let mut summary = RunSummary {
        committed: settings.commit,
        ..RunSummary::default()
    };

    for video in videos {
        let Some(episode) = video_pattern.episode_key(&video) else {
            reporter.event(Event::EpisodeNotFound { path: video })?;
            continue;
        };

        let Some(subtitle) = index.get(&episode) else {
            reporter.event(Event::NoSubtitle { path: video })?;
            continue;
        };

        let entry = RenamePlanEntry::new(
            &video,
            subtitle,
            &settings.subtitle_ext,
            &settings.video_ext,
            settings.trim,
        );
        reporter.event(Event::Rename(entry.clone()))?;

        if !settings.commit {
            continue;
        }
        match fs.rename(&entry.source, &entry.destination) {
            Ok(()) => summary.renamed += 1,
            Err(e) => {
                tracing::warn!(source = %entry.source.display(), error = %e, "Rename failed");
                summary.failed += 1;
                reporter.event(Event::RenameFailed {
                    source: entry.source,
                    destination: entry.destination,
                    reason: e.to_string(),
                })?;
            }
        }
    }

    Ok(summary)
}

fn build_index(
    subtitles: Vec<PathBuf>,
    pattern: &EpisodePattern,
    reporter: &mut dyn Reporter,
) -> Result<SubtitleIndex, MatchError> {
    let mut index = SubtitleIndex::default();

    for subtitle in subtitles {
        let Some(episode) = pattern.episode_key(&subtitle) else {
            reporter.event(Event::SubtitleIgnored { path: subtitle })?;
            continue;
        };
        if let Some(previous) = index.insert(episode.clone(), subtitle) {
            tracing::debug!(%episode, previous = %previous.display(), "Subtitle replaced for episode");
        }
    }

    Ok(index)
}
