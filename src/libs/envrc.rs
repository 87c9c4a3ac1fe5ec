// Idempotent editing of direnv's `.envrc`.
//
// The file belongs to the user, so it is only ever appended to: existing bytes
// are never rewritten. A line is added at most once, no matter how many times
// the tool runs against the same project.

use crate::libs::errors::EnvrcError;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// The `PATH_add` directive that puts `directory` on direnv's search path.
pub fn path_add_line(directory: &str) -> String {
    format!("PATH_add {directory}")
}

/// What [`ensure_line`] did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The line was already present; the file was not touched.
    AlreadyPresent,
    /// The header comment and the line were appended.
    Appended,
}

/// Makes sure `target_line` appears as a whole line of the file at `path`.
///
/// The file is scanned from the start; an exact, byte-for-byte match on any
/// line (with its newline removed) ends the call without writing anything.
/// Otherwise a `# Path added by <header>` comment followed by `target_line` is
/// appended in a single write. A newline is written first when the file is
/// non-empty and does not already end with one, so the block never lands on
/// the tail of a partial last line.
///
/// The caller must be the only writer of the file for the duration of the call.
pub fn ensure_line(
    path: &Path,
    target_line: &str,
    header: &str,
) -> Result<EnsureOutcome, EnvrcError> {
    // Appends always go to end-of-file, independently of where the scan below stops.
    let file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(|source| EnvrcError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let needs_leading_newline = match scan_for_line(&file, target_line) {
        Ok(Scan::Found) => return Ok(EnsureOutcome::AlreadyPresent),
        Ok(Scan::NotFound {
            needs_leading_newline,
        }) => needs_leading_newline,
        Err(source) => {
            return Err(EnvrcError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut block = String::new();
    if needs_leading_newline {
        block.push('\n');
    }
    block.push_str("# Path added by ");
    block.push_str(header);
    block.push('\n');
    block.push_str(target_line);
    block.push('\n');

    (&file)
        .write_all(block.as_bytes())
        .and_then(|()| (&file).flush())
        .map_err(|source| EnvrcError::Append {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(EnsureOutcome::Appended)
}

enum Scan {
    Found,
    NotFound { needs_leading_newline: bool },
}

fn scan_for_line(file: &File, target_line: &str) -> std::io::Result<Scan> {
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    // An empty file needs no separator.
    let mut ends_with_newline = true;

    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line)?;
        if read == 0 {
            return Ok(Scan::NotFound {
                needs_leading_newline: !ends_with_newline,
            });
        }
        ends_with_newline = line.last() == Some(&b'\n');
        let content = line.strip_suffix(b"\n").unwrap_or(&line);
        if content == target_line.as_bytes() {
            return Ok(Scan::Found);
        }
    }
}
