use regex::Regex;
use std::path::Path;

use crate::domain::models::Side;
use crate::error::MatchError;

/// A user supplied regex whose first capture group names the episode.
#[derive(Debug, Clone)]
pub struct EpisodePattern {
    side: Side,
    regex: Regex,
}

impl EpisodePattern {
    pub fn new(side: Side, pattern: &str) -> Result<Self, MatchError> {
        if pattern.is_empty() {
            return Err(MatchError::MissingPattern);
        }
        let regex = Regex::new(pattern).map_err(|source| MatchError::InvalidPattern {
            side,
            pattern: pattern.to_string(),
            source,
        })?;
        if regex.captures_len() < 2 {
            tracing::warn!(%side, pattern, "Pattern has no capture group, no file will match");
        }
        Ok(EpisodePattern { side, regex })
    }

    /// Episode key of a file, taken from its file name.
    ///
    /// A group that exists but did not take part in the match yields an empty key.
    pub fn episode_key(&self, file_path: &Path) -> Option<String> {
        let file_name = file_path.file_name()?.to_str()?;
        let caps = self.regex.captures(file_name)?;
        if caps.len() < 2 {
            return None;
        }
        let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        tracing::debug!(side = %self.side, file = file_name, key, "Extracted episode");
        Some(key.to_string())
    }
}
