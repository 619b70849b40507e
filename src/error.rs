use thiserror::Error;

use crate::domain::models::Side;

/// Errors that end a run before every video has been visited.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Regex pattern for subtitle and videos required. Aborting.")]
    MissingPattern,

    #[error("Invalid {side} regex '{pattern}'")]
    InvalidPattern {
        side: Side,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("No video files found. Aborting.")]
    NoVideos,

    #[error("No subtitles matching regex found. Aborting.")]
    NoSubtitlesMatched,

    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl MatchError {
    /// True for the outcomes where there was simply nothing to do.
    pub fn is_no_input(&self) -> bool {
        matches!(self, MatchError::NoVideos | MatchError::NoSubtitlesMatched)
    }
}
