// pixconv/src/core/planner.rs
use super::{ConvertError, OutputFormat, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One output combination for a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub format: OutputFormat,
    pub width: Option<u32>,
}

/// A single planned conversion, consumed once by the engine.
#[derive(Debug, Clone)]
pub struct ConversionTask {
    pub source: PathBuf,
    pub variant: Variant,
    pub target: PathBuf,
}

/// Cross product of formats and widths, format-major. With no widths every
/// format gets a single variant that keeps the native width.
pub fn plan_variants(output_formats: &[OutputFormat], widths: &[u32]) -> Vec<Variant> {
    if widths.is_empty() {
        return output_formats
            .iter()
            .map(|format| Variant {
                format: format.clone(),
                width: None,
            })
            .collect();
    }

    output_formats
        .iter()
        .flat_map(|format| {
            widths.iter().map(move |&width| Variant {
                format: format.clone(),
                width: Some(width),
            })
        })
        .collect()
}

/// `{target}/{relative dir}/{stem}[-{width}w].{format}`
pub fn compute_target_path(
    source_dir: &Path,
    target_dir: &Path,
    file_path: &Path,
    output_format: &OutputFormat,
    width: Option<u32>,
) -> Result<PathBuf> {
    let relative = file_path
        .strip_prefix(source_dir)
        .map_err(|_| ConvertError::PathOutsideSource {
            path: file_path.to_path_buf(),
            source_dir: source_dir.to_path_buf(),
        })?;

    let stem = relative
        .file_stem()
        .ok_or_else(|| {
            ConvertError::ProcessingError(format!("Invalid file name: {}", file_path.display()))
        })?;

    // Kept as an OsString so non-UTF-8 names map to distinct targets.
    let mut file_name = OsString::from(stem);
    if let Some(width) = width {
        file_name.push(format!("-{}w", width));
    }
    file_name.push(".");
    file_name.push(output_format.extension());

    let mut target = target_dir.to_path_buf();
    if let Some(parent) = relative.parent() {
        target.push(parent);
    }
    target.push(file_name);

    Ok(target)
}

/// Expands every file into its tasks, file-major then variant order.
pub fn build_tasks(
    source_dir: &Path,
    target_dir: &Path,
    files: &[PathBuf],
    variants: &[Variant],
) -> Result<Vec<ConversionTask>> {
    let mut tasks = Vec::with_capacity(files.len() * variants.len());

    for file in files {
        for variant in variants {
            let target =
                compute_target_path(source_dir, target_dir, file, &variant.format, variant.width)?;
            tasks.push(ConversionTask {
                source: file.clone(),
                variant: variant.clone(),
                target,
            });
        }
    }

    Ok(tasks)
}
