// Filesystem layout helpers: where the tools directory lives, how it is
// created, and how generated files get their permissions.

use crate::libs::errors::FsError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the tools directory when none is configured.
pub const DEFAULT_TOOLS_SUBDIRECTORY: &str = ".gotools";

/// rwxr-xr-x for created directories.
pub const UNIX_DIRECTORY_PERMISSIONS: u32 = 0o755;
/// rwxr-xr-x for the generated launcher scripts.
pub const UNIX_EXECUTABLE_FILE_PERMISSIONS: u32 = 0o755;

/// `<main_directory>/<subdirectory>`.
pub fn tools_directory(main_directory: &Path, subdirectory: &str) -> PathBuf {
    main_directory.join(subdirectory)
}

/// Creates `dir` and any missing parents. An existing directory is fine.
pub fn create_tools_directory(dir: &Path) -> Result<(), FsError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(UNIX_DIRECTORY_PERMISSIONS);
    }
    builder
        .create(dir)
        .map_err(|source| FsError::new("create tools directory", dir, source))
}

/// Sets `path` to rwxr-xr-x. The mode given at creation time only applies to
/// new files, so files being overwritten need this too.
#[cfg(unix)]
pub fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(UNIX_EXECUTABLE_FILE_PERMISSIONS);
    fs::set_permissions(path, perms)
}

// Executability is not a permission bit on this platform.
#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_directory_joins_subdirectory() {
        assert_eq!(
            tools_directory(Path::new("/work/project"), DEFAULT_TOOLS_SUBDIRECTORY),
            PathBuf::from("/work/project/.gotools")
        );
    }

    #[test]
    fn create_tools_directory_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join(".gotools");
        create_tools_directory(&dir).unwrap();
        create_tools_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn create_tools_directory_reports_conflicting_file() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join(".gotools");
        fs::write(&blocker, "not a directory").unwrap();
        let err = create_tools_directory(&blocker).unwrap_err();
        assert_eq!(err.operation, "create tools directory");
        assert_eq!(err.path, blocker);
    }

    #[cfg(unix)]
    #[test]
    fn make_executable_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("tool");
        fs::write(&file, "#!/bin/sh\n").unwrap();
        make_executable(&file).unwrap();
        let mode = fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
