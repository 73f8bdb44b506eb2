// pixconv/src/utils/mod.rs
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Rebuilds a path from its components, collapsing repeated separators,
/// `.` segments (leading ones included) and trailing separators into one
/// canonical form. A path made only of `.` becomes `.`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() && !path.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Absolute form of `path` for comparisons: the nearest existing ancestor is
/// canonicalized and the missing remainder is appended lexically.
pub fn resolve_absolute(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut missing: Vec<OsString> = Vec::new();
    let mut current = absolute.as_path();
    let mut resolved = loop {
        match current.canonicalize() {
            Ok(canonical) => break canonical,
            Err(e) => match (current.parent(), current.components().next_back()) {
                (Some(parent), Some(last)) => {
                    missing.push(last.as_os_str().to_os_string());
                    current = parent;
                }
                _ => return Err(e),
            },
        }
    };

    for name in missing.iter().rev() {
        match Path::new(name).components().next() {
            Some(Component::ParentDir) => {
                resolved.pop();
            }
            Some(Component::CurDir) | None => {}
            Some(_) => resolved.push(name),
        }
    }

    Ok(resolved)
}

/// Lowercased text after the final `.` of the file name. Names without a
/// dot, ending in a dot, or consisting of a leading dot only have none.
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|s| s.to_ascii_lowercase())
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}
