// pixconv/src/core/mod.rs
pub mod engine;
pub mod planner;

use crate::utils::{normalize_path, resolve_absolute};
use image::ImageFormat;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INPUT_FORMATS: [&str; 3] = ["jpeg", "jpg", "png"];
pub const DEFAULT_OUTPUT_FORMATS: [&str; 1] = ["webp"];

/// Raw conversion options, as collected from the command line or built by a
/// library caller. Turned into a [`ConvertConfig`] by [`ConvertOptions::resolve`].
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub source: PathBuf,
    pub target: PathBuf,
    pub input_formats: Vec<String>,
    pub output_formats: Vec<String>,
    pub widths: Vec<u32>,
    pub enlarge: bool,
    pub clear: bool,
    pub verbose: bool,
    pub debug: bool,
    pub quality: u8,
    pub optimize_png: bool,
    pub threads: usize,
    pub fail_fast: bool,
    pub dry_run: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            target: PathBuf::new(),
            input_formats: DEFAULT_INPUT_FORMATS.iter().map(|s| s.to_string()).collect(),
            output_formats: DEFAULT_OUTPUT_FORMATS.iter().map(|s| s.to_string()).collect(),
            widths: Vec::new(),
            enlarge: false,
            clear: false,
            verbose: false,
            debug: false,
            quality: 80,
            optimize_png: true,
            threads: 0,
            fail_fast: false,
            dry_run: false,
        }
    }
}

/// An output format requested by the user: the extension written on disk and
/// the encoder it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    extension: String,
    format: ImageFormat,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Result<Self> {
        let extension = normalize_format_name(name);
        if extension.is_empty() {
            return Err(ConvertError::Config("Output format cannot be empty".to_string()));
        }

        let format = ImageFormat::from_extension(&extension)
            .filter(|f| f.writing_enabled())
            .ok_or_else(|| ConvertError::UnsupportedFormat(extension.clone()))?;

        Ok(Self { extension, format })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn image_format(&self) -> ImageFormat {
        self.format
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extension)
    }
}

/// Validated, immutable configuration consumed by the engine.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    source_dir: PathBuf,
    target_dir: PathBuf,
    excluded_subtree: Option<PathBuf>,
    input_formats: BTreeSet<String>,
    output_formats: Vec<OutputFormat>,
    widths: Vec<u32>,
    enlarge: bool,
    clear: bool,
    verbose: bool,
    debug: bool,
    quality: u8,
    optimize_png: bool,
    threads: usize,
    fail_fast: bool,
    dry_run: bool,
}

impl ConvertOptions {
    pub fn resolve(self) -> Result<ConvertConfig> {
        if self.source.as_os_str().is_empty() {
            return Err(ConvertError::Config("Source folder is required".to_string()));
        }

        if self.target.as_os_str().is_empty() {
            return Err(ConvertError::Config("Target folder is required".to_string()));
        }

        let source_dir = normalize_path(&self.source);
        let target_dir = normalize_path(&self.target);

        // Guards compare absolute paths so "./a", "a" and "/cwd/a" agree.
        let source_abs =
            resolve_absolute(&source_dir).map_err(|e| ConvertError::filesystem(&source_dir, e))?;
        let target_abs =
            resolve_absolute(&target_dir).map_err(|e| ConvertError::filesystem(&target_dir, e))?;

        if source_abs == target_abs {
            return Err(ConvertError::Config(
                "Source and target folders cannot be the same".to_string(),
            ));
        }

        if self.clear && source_abs.starts_with(&target_abs) {
            return Err(ConvertError::Config(format!(
                "Refusing to clear {}: it contains the source folder",
                target_dir.display()
            )));
        }

        // A target below the source is pruned from the walk, spelled the way
        // the walk spells paths under `source_dir`.
        let excluded_subtree = target_abs
            .strip_prefix(&source_abs)
            .ok()
            .map(|relative| source_dir.join(relative));

        let input_formats: BTreeSet<String> = self
            .input_formats
            .iter()
            .map(|f| normalize_format_name(f))
            .filter(|f| !f.is_empty())
            .collect();

        if input_formats.is_empty() {
            return Err(ConvertError::Config("Input formats are required".to_string()));
        }

        let mut output_formats: Vec<OutputFormat> = Vec::new();
        for name in &self.output_formats {
            let format = OutputFormat::parse(name)?;
            if !output_formats.contains(&format) {
                output_formats.push(format);
            }
        }

        if output_formats.is_empty() {
            return Err(ConvertError::Config("Output formats are required".to_string()));
        }

        let mut widths: Vec<u32> = Vec::new();
        for &width in &self.widths {
            if width == 0 {
                return Err(ConvertError::Config("Widths must be positive".to_string()));
            }
            if width > 100_000 {
                return Err(ConvertError::Config(
                    "Width too large (max 100,000 pixels)".to_string(),
                ));
            }
            if !widths.contains(&width) {
                widths.push(width);
            }
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(ConvertError::Config(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        let config = ConvertConfig {
            source_dir,
            target_dir,
            excluded_subtree,
            input_formats,
            output_formats,
            widths,
            enlarge: self.enlarge,
            clear: self.clear,
            verbose: self.verbose,
            debug: self.debug,
            quality: self.quality,
            optimize_png: self.optimize_png,
            threads: self.threads,
            fail_fast: self.fail_fast,
            dry_run: self.dry_run,
        };

        log::info!("All settings passed validation");
        log::debug!("Resolved configuration: {:?}", config);

        Ok(config)
    }
}

impl ConvertConfig {
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// The target folder as seen from inside the source walk, when nested.
    pub fn excluded_subtree(&self) -> Option<&Path> {
        self.excluded_subtree.as_deref()
    }

    pub fn input_formats(&self) -> &BTreeSet<String> {
        &self.input_formats
    }

    pub fn output_formats(&self) -> &[OutputFormat] {
        &self.output_formats
    }

    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    pub fn enlarge(&self) -> bool {
        self.enlarge
    }

    pub fn clear(&self) -> bool {
        self.clear
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn optimize_png(&self) -> bool {
        self.optimize_png
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

fn normalize_format_name(name: &str) -> String {
    name.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Memory limit exceeded: {0}")]
    MemoryLimitExceeded(String),

    #[error("File {path} is not inside source folder {source_dir}")]
    PathOutsideSource { path: PathBuf, source_dir: PathBuf },
}

impl ConvertError {
    pub(crate) fn filesystem(path: &Path, source: std::io::Error) -> Self {
        ConvertError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
