// Derives the short command name of a Go tool from its package path.
//
// `golang.org/x/tools/cmd/goimports@latest` becomes `goimports`. The name is
// used both as the launcher script's filename and as the isolated module name.

/// Returns the command name for `package_path`, or `None` when nothing usable
/// remains once the version information has been stripped.
///
/// Major-version path elements (`/v2`, `gopkg.in/yaml.v3`) are removed from the
/// end of the path before the last segment is taken, so `example.com/tool/v2`
/// yields `tool`. A `@version` selector is cut off the final segment.
pub fn derive_command_name(package_path: &str) -> Option<String> {
    let (path_without_version, _) = split_path_version(package_path.trim())?;
    let base = last_segment(path_without_version);
    let name = match base.find('@') {
        Some(index) => &base[..index],
        None => base,
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Splits a module path into its prefix and its major-version suffix
/// (`/vN` or, for `gopkg.in`, `.vN`).
///
/// Returns `None` for paths whose version suffix is malformed: `/v0`, `/v1`,
/// leading zeros or a dotted version such as `/v2.1`.
pub fn split_path_version(path: &str) -> Option<(&str, &str)> {
    if path.starts_with("gopkg.in/") {
        return split_gopkg_in(path);
    }

    let bytes = path.as_bytes();
    let mut i = bytes.len();
    let mut dot = false;
    while i > 0 && (bytes[i - 1].is_ascii_digit() || bytes[i - 1] == b'.') {
        if bytes[i - 1] == b'.' {
            dot = true;
        }
        i -= 1;
    }
    if i <= 1 || i == bytes.len() || bytes[i - 1] != b'v' || bytes[i - 2] != b'/' {
        return Some((path, ""));
    }

    let (prefix, major) = path.split_at(i - 2);
    if dot || major.len() <= 2 || major.as_bytes()[2] == b'0' || major == "/v1" {
        return None;
    }
    Some((prefix, major))
}

fn split_gopkg_in(path: &str) -> Option<(&str, &str)> {
    let bytes = path.as_bytes();
    let mut i = path.strip_suffix("-unstable").unwrap_or(path).len();
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i <= 1 || bytes[i - 1] != b'v' || bytes[i - 2] != b'.' {
        return None;
    }

    let (prefix, major) = path.split_at(i - 2);
    if major.len() <= 2 || (major.as_bytes()[2] == b'0' && major != ".v0") {
        return None;
    }
    Some((prefix, major))
}

// Last `/`-separated element, ignoring trailing slashes.
fn last_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    }
}
