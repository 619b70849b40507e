use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which file list a pattern or file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Subtitle,
    Video,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Subtitle => write!(f, "subtitle"),
            Side::Video => write!(f, "video"),
        }
    }
}

/// How the subtitle extension is removed before the video extension is appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimMode {
    /// Remove the literal ".<ext>" suffix, if present.
    #[default]
    Suffix,
    /// Remove every trailing character found in ".<ext>" (legacy behaviour).
    Charset,
}

impl TrimMode {
    pub fn trim<'a>(&self, file_name: &'a str, ext: &str) -> &'a str {
        let dotted = format!(".{ext}");
        match self {
            TrimMode::Suffix => file_name.strip_suffix(dotted.as_str()).unwrap_or(file_name),
            TrimMode::Charset => file_name.trim_end_matches(|c: char| dotted.contains(c)),
        }
    }
}

/// Episode key -> subtitle path. Later insertions for the same key win.
#[derive(Debug, Default)]
pub struct SubtitleIndex {
    by_episode: HashMap<String, PathBuf>,
}

impl SubtitleIndex {
    /// Returns the subtitle that was displaced, if any.
    pub fn insert(&mut self, episode: String, subtitle: PathBuf) -> Option<PathBuf> {
        self.by_episode.insert(episode, subtitle)
    }

    pub fn get(&self, episode: &str) -> Option<&Path> {
        self.by_episode.get(episode).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.by_episode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_episode.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlanEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl RenamePlanEntry {
    /// The video takes the subtitle's name, keeping its own extension.
    pub fn new(
        video: &Path,
        subtitle: &Path,
        sub_ext: &str,
        vid_ext: &str,
        trim: TrimMode,
    ) -> Self {
        let subtitle_name = subtitle
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let base = trim.trim(&subtitle_name, sub_ext);
        RenamePlanEntry {
            source: video.to_path_buf(),
            destination: subtitle.with_file_name(format!("{base}.{vid_ext}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub committed: bool,
    pub renamed: usize,
    pub failed: usize,
}
