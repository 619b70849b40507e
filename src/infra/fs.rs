use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The filesystem operations a run needs.
pub trait FileSystem {
    /// Regular files in `dir` named `*.<ext>`, sorted by name.
    fn list_files(&self, dir: &Path, ext: &str) -> Vec<PathBuf>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn list_files(&self, dir: &Path, ext: &str) -> Vec<PathBuf> {
        match collect_files(dir, ext) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to list directory");
                Vec::new()
            }
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

fn collect_files(dir: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let suffix = format!(".{ext}");
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();

        // Lossy is enough for the suffix test: only invalid bytes are replaced.
        let lossy = name.to_string_lossy();
        if !lossy.ends_with(&suffix) {
            continue;
        }
        let path = entry_path(dir, &name);
        if !path.is_file() {
            continue;
        }
        if name.to_str().is_none() {
            tracing::warn!(
                file = %lossy,
                "File name is not valid UTF-8, no episode can be read from it"
            );
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Files listed from the current directory are named bare, as a shell glob would.
fn entry_path(dir: &Path, name: &OsStr) -> PathBuf {
    if dir.as_os_str().is_empty() || dir == Path::new(".") {
        PathBuf::from(name)
    } else {
        dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_list_files_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        File::create(dir.join("b.srt")).unwrap();
        File::create(dir.join("a.srt")).unwrap();
        File::create(dir.join("a.mp4")).unwrap();
        File::create(dir.join("notes.srt.txt")).unwrap();
        fs::create_dir(dir.join("folder.srt")).unwrap();

        let files = DiskFileSystem.list_files(dir, "srt");
        assert_eq!(files, vec![dir.join("a.srt"), dir.join("b.srt")]);
    }

    #[test]
    fn test_list_files_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        File::create(dir.join("upper.MP4")).unwrap();

        assert!(DiskFileSystem.list_files(dir, "mp4").is_empty());
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        assert!(DiskFileSystem.list_files(&missing, "mp4").is_empty());
    }

    #[test]
    fn test_entry_path_in_current_directory_is_bare() {
        assert_eq!(
            entry_path(Path::new("."), OsStr::new("Show.S01E05.mp4")),
            PathBuf::from("Show.S01E05.mp4")
        );
        assert_eq!(
            entry_path(Path::new("./"), OsStr::new("Show.S01E05.mp4")),
            PathBuf::from("Show.S01E05.mp4")
        );
        assert_eq!(
            entry_path(Path::new("media"), OsStr::new("Show.S01E05.mp4")),
            PathBuf::from("media/Show.S01E05.mp4")
        );
    }

    #[test]
    fn test_list_current_directory() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("Show.S01E05.mp4")).unwrap();
        File::create(temp_dir.path().join("Show.1x05.srt")).unwrap();

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();
        let files = DiskFileSystem.list_files(Path::new("."), "mp4");
        std::env::set_current_dir(previous).unwrap();

        assert_eq!(files, vec![PathBuf::from("Show.S01E05.mp4")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_keeps_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let name = OsStr::from_bytes(b"Show\xff.S01E05.mp4");
        if File::create(dir.join(name)).is_err() {
            // Some filesystems refuse non-UTF-8 names outright.
            return;
        }
        File::create(dir.join("Show.S01E06.mp4")).unwrap();

        let files = DiskFileSystem.list_files(dir, "mp4");
        assert_eq!(files.len(), 2);
        assert!(files.contains(&dir.join(name)));
    }

    #[test]
    fn test_rename_moves_file() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("Show.S01E05.mp4");
        let to = temp_dir.path().join("Show.1x05.mp4");
        File::create(&from).unwrap();

        DiskFileSystem.rename(&from, &to).unwrap();
        assert!(!from.exists());
        assert!(to.exists());
    }
}
