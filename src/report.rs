//! User facing output of a run.
//!
//! The renamer emits [`Event`]s in the order files are visited, then either a
//! [`RunSummary`] or the error that aborted the run.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::domain::models::{RenamePlanEntry, RunSummary};
use crate::error::MatchError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Found {
        videos: usize,
        video_ext: String,
        subtitles: usize,
        subtitle_ext: String,
    },
    SubtitleIgnored {
        path: PathBuf,
    },
    EpisodeNotFound {
        path: PathBuf,
    },
    NoSubtitle {
        path: PathBuf,
    },
    Rename(RenamePlanEntry),
    RenameFailed {
        source: PathBuf,
        destination: PathBuf,
        reason: String,
    },
}

pub trait Reporter {
    fn event(&mut self, event: Event) -> io::Result<()>;
    fn finish(&mut self, summary: &RunSummary) -> io::Result<()>;
    fn abort(&mut self, error: &MatchError) -> io::Result<()>;
}

/// Build the reporter for `format`, writing to stdout.
pub fn stdout_reporter(format: OutputFormat) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Text => Box::new(TextReporter::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonReporter::new(io::stdout())),
    }
}

/// Line per event, the way the tool has always printed.
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        TextReporter { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Found {
                videos,
                video_ext,
                subtitles,
                subtitle_ext,
            } => writeln!(
                self.out,
                "Found total {videos} video files (*.{video_ext}) and {subtitles} subtitle files (*.{subtitle_ext})."
            ),
            Event::SubtitleIgnored { path } => writeln!(
                self.out,
                "  [X] Ignoring subtitle file '{}' (does not match regex).",
                path.display()
            ),
            Event::EpisodeNotFound { path } => writeln!(
                self.out,
                "  [X] '{}' -> Skipping (episode not found matching regex).",
                path.display()
            ),
            Event::NoSubtitle { path } => writeln!(
                self.out,
                "  [X] No subtitle file found for '{}'. Skipping.",
                path.display()
            ),
            Event::Rename(entry) => writeln!(
                self.out,
                "  [*] '{}' -> '{}'",
                entry.source.display(),
                entry.destination.display()
            ),
            Event::RenameFailed {
                source,
                destination,
                reason,
            } => writeln!(
                self.out,
                "  [!] Failed to rename '{}' -> '{}': {reason}",
                source.display(),
                destination.display()
            ),
        }
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        match summary.renamed {
            0 => writeln!(self.out, "No files renamed.")?,
            n => writeln!(self.out, "{n} files renamed.")?,
        }
        if summary.failed > 0 {
            writeln!(self.out, "{} files could not be renamed.", summary.failed)?;
        }
        self.out.flush()
    }

    fn abort(&mut self, error: &MatchError) -> io::Result<()> {
        writeln!(self.out, "{error}")?;
        self.out.flush()
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    events: &'a [Event],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a RunSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aborted: Option<String>,
}

/// Buffers events and writes a single JSON document once the run ends.
pub struct JsonReporter<W: Write> {
    out: W,
    events: Vec<Event>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        JsonReporter {
            out,
            events: Vec::new(),
        }
    }

    fn write_document(&mut self, document: &JsonDocument<'_>) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, document)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn event(&mut self, event: Event) -> io::Result<()> {
        self.events.push(event);
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        let events = std::mem::take(&mut self.events);
        self.write_document(&JsonDocument {
            events: &events,
            summary: Some(summary),
            aborted: None,
        })
    }

    fn abort(&mut self, error: &MatchError) -> io::Result<()> {
        let events = std::mem::take(&mut self.events);
        self.write_document(&JsonDocument {
            events: &events,
            summary: None,
            aborted: Some(error.to_string()),
        })
    }
}
