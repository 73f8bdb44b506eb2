// pixconv/src/processors/walker.rs
use crate::core::Result;
use crate::utils::get_file_extension;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collects every regular file under `source_dir` whose
/// extension is one of `input_formats`, in lexical walk order.
///
/// When `exclude` is set, that subtree is not descended into. This keeps a
/// target folder nested inside the source from being scanned.
pub fn enumerate_eligible_files(
    source_dir: &Path,
    input_formats: &BTreeSet<String>,
    exclude: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match exclude {
            Some(excluded) => entry.depth() == 0 || entry.path() != excluded,
            None => true,
        });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let eligible = get_file_extension(entry.path())
            .map(|ext| input_formats.contains(&ext))
            .unwrap_or(false);

        if eligible {
            paths.push(entry.into_path());
        } else {
            log::debug!("Ignoring {}", entry.path().display());
        }
    }

    log::info!(
        "Found {} images in {}",
        paths.len(),
        source_dir.display()
    );

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn formats(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_filters_by_extension() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "a.png");
        touch(root, "b.JPG");
        touch(root, "c.gif");
        touch(root, "notes.txt");
        touch(root, "README");
        touch(root, ".png");
        touch(root, "nested/deeper/d.jpeg");
        fs::create_dir_all(root.join("folder.png")).unwrap();

        let files = enumerate_eligible_files(root, &formats(&["png", "jpg", "jpeg"]), None).unwrap();
        let relative: Vec<PathBuf> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("a.png"),
                PathBuf::from("b.JPG"),
                PathBuf::from("nested/deeper/d.jpeg"),
            ]
        );
    }

    #[test]
    fn test_order_is_lexical() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "z.png");
        touch(root, "m/a.png");
        touch(root, "a.png");

        let first = enumerate_eligible_files(root, &formats(&["png"]), None).unwrap();
        let second = enumerate_eligible_files(root, &formats(&["png"]), None).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![root.join("a.png"), root.join("m/a.png"), root.join("z.png")]
        );
    }

    #[test]
    fn test_excluded_subtree_is_skipped() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "a.png");
        touch(root, "out/a.png");

        let excluded = root.join("out");
        let files = enumerate_eligible_files(root, &formats(&["png"]), Some(&excluded)).unwrap();

        assert_eq!(files, vec![root.join("a.png")]);
    }

    #[test]
    fn test_missing_source_is_error() {
        let temp = TempDir::new().unwrap();
        let result = enumerate_eligible_files(&temp.path().join("missing"), &formats(&["png"]), None);
        assert!(result.is_err());
    }
}
