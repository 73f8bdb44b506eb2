mod cli;
pub mod core;
pub mod processors;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::core::engine::{prepare_output_directory, ConversionEngine, ConversionReport, TaskOutcome};
pub use crate::core::planner::{build_tasks, compute_target_path, plan_variants, ConversionTask, Variant};
pub use crate::core::{ConvertConfig, ConvertError, ConvertOptions, OutputFormat, Result};
pub use crate::processors::{
    enumerate_eligible_files, BatchProcessor, Compressor, ImageTransformer, Loader,
    ResizeAlgorithm, Resizer, TransformRequest, Transformer,
};
pub use crate::utils::{format_file_size, get_file_extension, normalize_path, resolve_absolute};
