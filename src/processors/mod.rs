// pixconv/src/processors/mod.rs
mod batch;
mod compressor;
mod loader;
mod resizer;
pub mod transformer;
pub mod walker;

pub use batch::BatchProcessor;
pub use compressor::Compressor;
pub use loader::Loader;
pub use resizer::{ResizeAlgorithm, Resizer};
pub use transformer::{ImageTransformer, TransformRequest, Transformer};
pub use walker::enumerate_eligible_files;
