// pixconv/src/core/engine.rs
use super::planner::{build_tasks, plan_variants, ConversionTask};
use super::{ConvertConfig, ConvertError, Result};
use crate::processors::walker::enumerate_eligible_files;
use crate::processors::{BatchProcessor, TransformRequest, Transformer};
use crate::utils::{format_file_size, get_file_extension};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Converted { bytes_read: u64, bytes_written: u64 },
    /// Source already has the requested format and no resize was asked for.
    Skipped { size: u64 },
    /// Dry run: nothing was written.
    Planned,
}

#[derive(Debug, Default)]
pub struct ConversionReport {
    pub files_found: usize,
    pub converted: usize,
    pub skipped: usize,
    pub planned: usize,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub failures: Vec<(PathBuf, String)>,
}

impl ConversionReport {
    pub fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Converted {
                bytes_read,
                bytes_written,
            } => {
                self.converted += 1;
                self.bytes_read += bytes_read;
                self.bytes_written += bytes_written;
            }
            TaskOutcome::Skipped { .. } => self.skipped += 1,
            TaskOutcome::Planned => self.planned += 1,
        }
    }

    /// Conversions that were actually tried: written artifacts plus failures.
    pub fn attempted(&self) -> usize {
        self.converted + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Removes `path` first when `delete_if_exists` is set, then creates it with
/// all missing ancestors. Creating an existing directory is not an error.
pub fn prepare_output_directory(path: &Path, delete_if_exists: bool) -> Result<()> {
    if delete_if_exists {
        match fs::symlink_metadata(path) {
            Ok(metadata) => {
                log::info!("Deleting target folder: {}", path.display());
                let removed = if metadata.is_dir() {
                    fs::remove_dir_all(path)
                } else {
                    fs::remove_file(path)
                };
                removed.map_err(|e| ConvertError::filesystem(path, e))?;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ConvertError::filesystem(path, e)),
        }
    }

    fs::create_dir_all(path).map_err(|e| ConvertError::filesystem(path, e))
}

/// Walks the source tree and produces every requested variant of every
/// eligible image under the mirrored target tree.
pub struct ConversionEngine<T: Transformer> {
    config: ConvertConfig,
    transformer: T,
    show_progress: bool,
}

impl<T: Transformer> ConversionEngine<T> {
    pub fn new(config: ConvertConfig, transformer: T) -> Self {
        Self {
            config,
            transformer,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn run(&self) -> Result<ConversionReport> {
        let config = &self.config;

        if config.dry_run() {
            log::info!("Dry run: nothing will be written to {}", config.target_dir().display());
        } else {
            prepare_output_directory(config.target_dir(), config.clear())?;
        }

        let files = enumerate_eligible_files(
            config.source_dir(),
            config.input_formats(),
            config.excluded_subtree(),
        )?;

        let variants = plan_variants(config.output_formats(), config.widths());
        let tasks = build_tasks(config.source_dir(), config.target_dir(), &files, &variants)?;

        log::info!(
            "Planned {} conversions for {} images, optimizing...",
            tasks.len(),
            files.len()
        );

        let mut report = ConversionReport {
            files_found: files.len(),
            ..Default::default()
        };

        let batch = BatchProcessor::new(config.threads(), config.fail_fast())?
            .with_progress(self.show_progress);
        batch.execute(&tasks, &mut report, |task| self.convert_one(task))?;

        log::info!(
            "Converted {}, skipped {}, failed {} ({} -> {})",
            report.converted,
            report.skipped,
            report.failures.len(),
            format_file_size(report.bytes_read),
            format_file_size(report.bytes_written)
        );

        Ok(report)
    }

    pub fn convert_one(&self, task: &ConversionTask) -> Result<TaskOutcome> {
        let variant = &task.variant;

        log::debug!(
            "Optimizing image: {} -> {} {}",
            task.source.display(),
            variant.format,
            variant
                .width
                .map(|w| format!("{}w", w))
                .unwrap_or_default()
        );

        let source_ext = get_file_extension(&task.source);
        if variant.width.is_none() && source_ext.as_deref() == Some(variant.format.extension()) {
            let size = fs::metadata(&task.source)
                .map_err(|e| ConvertError::filesystem(&task.source, e))?
                .len();
            log::info!(
                "Skipping image {} (correct format & size, {})",
                task.source.display(),
                format_file_size(size)
            );
            return Ok(TaskOutcome::Skipped { size });
        }

        if self.config.dry_run() {
            log::info!("Would write {}", task.target.display());
            return Ok(TaskOutcome::Planned);
        }

        if let Some(parent) = task.target.parent() {
            prepare_output_directory(parent, false)?;
        }

        let source = fs::read(&task.source).map_err(|e| ConvertError::filesystem(&task.source, e))?;

        let request = TransformRequest {
            width: variant.width,
            allow_enlarge: self.config.enlarge(),
            format: variant.format.image_format(),
        };
        let encoded = self.transformer.transform(&source, &request).map_err(|e| {
            ConvertError::ProcessingError(format!("{}: {}", task.source.display(), e))
        })?;

        fs::write(&task.target, &encoded).map_err(|e| ConvertError::filesystem(&task.target, e))?;

        log::debug!(
            "Saved image: {} ({})",
            task.target.display(),
            format_file_size(encoded.len() as u64)
        );

        Ok(TaskOutcome::Converted {
            bytes_read: source.len() as u64,
            bytes_written: encoded.len() as u64,
        })
    }
}
