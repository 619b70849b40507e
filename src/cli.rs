use clap::Parser;
use std::path::PathBuf;

use crate::domain::models::TrimMode;
use crate::report::OutputFormat;

#[derive(Parser, Debug, Default)]
#[command(name = "vsrename", version)]
#[command(about = "Rename video files after the subtitle file of the same episode")]
#[command(after_help = "Examples:
  (show renames without actually renaming)
  vsrename --subext=\"srt\" --vidext=\"mp4\" --subregex=\".*1x([0-9]+).*\" --vidregex=\".*S01E([0-9]+).*\"

  (show renames and actually rename)
  vsrename -w --subext=\"srt\" --vidext=\"mp4\" --subregex=\".*1x([0-9]+).*\" --vidregex=\".*S01E([0-9]+).*\"")]
pub struct Cli {
    /// The extension of the subtitle files, without leading '.' [default: srt]
    #[arg(long)]
    pub subext: Option<String>,

    /// The extension of the video files, without leading '.' [default: mp4]
    #[arg(long)]
    pub vidext: Option<String>,

    /// The regex to identify the episode of each subtitle file (as a regex group)
    #[arg(long)]
    pub subregex: Option<String>,

    /// The regex to identify the episode of each video file (as a regex group)
    #[arg(long)]
    pub vidregex: Option<String>,

    /// The path to the location of the video and subtitle files [default: .]
    #[arg(short = 'l', long)]
    pub location: Option<PathBuf>,

    /// Actually perform the rename
    #[arg(short = 'w', long)]
    pub write: bool,

    /// How the subtitle extension is stripped [default: suffix]
    #[arg(long, value_enum)]
    pub trim: Option<TrimMode>,

    /// Report format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file to read defaults from instead of the user config
    #[arg(long)]
    pub config: Option<PathBuf>,
}
