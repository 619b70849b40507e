use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::domain::models::TrimMode;
use crate::report::OutputFormat;

const DEFAULT_SUBTITLE_EXT: &str = "srt";
const DEFAULT_VIDEO_EXT: &str = "mp4";

/// Defaults read from `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    subext: Option<String>,
    vidext: Option<String>,
    subregex: Option<String>,
    vidregex: Option<String>,
    location: Option<PathBuf>,
    trim: Option<TrimMode>,
    format: Option<OutputFormat>,
}

impl ConfigFile {
    /// Read `explicit` if given, which must exist, else the user config if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(explicit, get_config_path().as_deref())
    }

    /// Like [`ConfigFile::load`] with the default location passed in. `None`
    /// means there is no config directory to look in.
    fn load_from(explicit: Option<&Path>, default: Option<&Path>) -> Result<Self> {
        let path = match (explicit, default) {
            (Some(path), _) => {
                if !path.is_file() {
                    bail!("Config file not found: {}", path.display());
                }
                path
            }
            (None, Some(path)) if path.is_file() => path,
            (None, Some(path)) => {
                tracing::debug!(path = %path.display(), "No user config file");
                return Ok(ConfigFile::default());
            }
            (None, None) => {
                tracing::debug!("No config directory, skipping user config");
                return Ok(ConfigFile::default());
            }
        };

        tracing::info!(path = %path.display(), "Using config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Everything a run needs, fixed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub subtitle_ext: String,
    pub video_ext: String,
    pub subtitle_pattern: String,
    pub video_pattern: String,
    pub location: PathBuf,
    pub commit: bool,
    pub trim: TrimMode,
    pub format: OutputFormat,
}

impl Settings {
    /// Command line flags win over the config file, which wins over built-in defaults.
    pub fn resolve(cli: Cli, file: ConfigFile) -> Self {
        Settings {
            subtitle_ext: cli
                .subext
                .or(file.subext)
                .unwrap_or_else(|| DEFAULT_SUBTITLE_EXT.to_string()),
            video_ext: cli
                .vidext
                .or(file.vidext)
                .unwrap_or_else(|| DEFAULT_VIDEO_EXT.to_string()),
            subtitle_pattern: cli.subregex.or(file.subregex).unwrap_or_default(),
            video_pattern: cli.vidregex.or(file.vidregex).unwrap_or_default(),
            location: cli
                .location
                .or(file.location)
                .unwrap_or_else(|| PathBuf::from(".")),
            commit: cli.write,
            trim: cli.trim.or(file.trim).unwrap_or_default(),
            format: cli.format.or(file.format).unwrap_or_default(),
        }
    }
}

fn get_config_dir_path() -> Option<PathBuf> {
    // `None` when there is no standard config dir (e.g. `$HOME` is not set).
    xdir::config().map(|path| path.join("vsrename"))
}

fn get_config_path() -> Option<PathBuf> {
    get_config_dir_path().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_flags_or_file() {
        let settings = Settings::resolve(Cli::default(), ConfigFile::default());
        assert_eq!(settings.subtitle_ext, "srt");
        assert_eq!(settings.video_ext, "mp4");
        assert_eq!(settings.subtitle_pattern, "");
        assert_eq!(settings.video_pattern, "");
        assert_eq!(settings.location, PathBuf::from("."));
        assert!(!settings.commit);
        assert_eq!(settings.trim, TrimMode::Suffix);
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            subext = "ass"
            vidext = "mkv"
            subregex = "E([0-9]+)"
            trim = "charset"
            format = "json"
            "#,
        )
        .unwrap();
        let cli = Cli {
            vidext: Some("avi".into()),
            write: true,
            ..Cli::default()
        };

        let settings = Settings::resolve(cli, file);
        assert_eq!(settings.subtitle_ext, "ass");
        assert_eq!(settings.video_ext, "avi");
        assert_eq!(settings.subtitle_pattern, "E([0-9]+)");
        assert_eq!(settings.video_pattern, "");
        assert!(settings.commit);
        assert_eq!(settings.trim, TrimMode::Charset);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "vidregex = \"S01E([0-9]+)\"\nlocation = \"/media/show\"\n").unwrap();

        let file = ConfigFile::load(Some(&path)).unwrap();
        assert_eq!(file.vidregex.as_deref(), Some("S01E([0-9]+)"));
        assert_eq!(file.location, Some(PathBuf::from("/media/show")));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");
        assert!(ConfigFile::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_default_file_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let default = temp_dir.path().join("vsrename").join("config.toml");

        let file = ConfigFile::load_from(None, Some(&default)).unwrap();
        assert!(file.subregex.is_none());
        assert!(file.location.is_none());
    }

    #[test]
    fn test_default_file_is_read_when_present() {
        let temp_dir = TempDir::new().unwrap();
        let default = temp_dir.path().join("config.toml");
        fs::write(&default, "subext = \"ass\"\n").unwrap();

        let file = ConfigFile::load_from(None, Some(&default)).unwrap();
        assert_eq!(file.subext.as_deref(), Some("ass"));
    }

    #[test]
    fn test_no_config_directory_skips_lookup() {
        let file = ConfigFile::load_from(None, None).unwrap();
        assert!(file.vidregex.is_none());
    }

    #[test]
    fn test_explicit_file_wins_over_default() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().join("explicit.toml");
        let default = temp_dir.path().join("config.toml");
        fs::write(&explicit, "vidext = \"mkv\"\n").unwrap();
        fs::write(&default, "vidext = \"avi\"\n").unwrap();

        let file = ConfigFile::load_from(Some(&explicit), Some(&default)).unwrap();
        assert_eq!(file.vidext.as_deref(), Some("mkv"));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "write = true\n").unwrap();

        let err = ConfigFile::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }
}
