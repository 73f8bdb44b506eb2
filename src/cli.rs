// pixconv/src/cli.rs
use crate::core::ConvertOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pixconv",
    version,
    about = "Convert and resize every image in a folder tree",
    long_about = "Scans SOURCE for images in the input formats and writes one copy per \
                  output format and width to TARGET, mirroring the folder layout. \
                  Output files are named {dir}/{name}[-{width}w].{format}.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Source folder with images to convert
    #[arg(short, long)]
    pub source: PathBuf,

    /// Target folder for converted images
    #[arg(short, long)]
    pub target: PathBuf,

    /// Input formats to convert
    #[arg(
        short,
        long,
        alias = "inputFormats",
        num_args = 1..,
        value_delimiter = ',',
        default_values = ["jpeg", "jpg", "png"]
    )]
    pub input_formats: Vec<String>,

    /// Output formats to convert to
    #[arg(
        short,
        long,
        alias = "outputFormats",
        num_args = 1..,
        value_delimiter = ',',
        default_values = ["webp"]
    )]
    pub output_formats: Vec<String>,

    /// Widths to resize to; omit to keep the native width
    #[arg(
        short,
        long,
        num_args = 1..,
        value_delimiter = ',',
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub widths: Vec<u32>,

    /// Enlarge images smaller than the requested width
    #[arg(short, long)]
    pub enlarge: bool,

    /// Clear target folder before converting
    #[arg(short, long)]
    pub clear: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Encoding quality for lossy formats (1-100)
    #[arg(short, long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Skip the lossless oxipng pass on PNG output
    #[arg(long)]
    pub no_png_optimize: bool,

    /// Worker threads (0 = one per CPU)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub threads: usize,

    /// Abort on the first failed conversion
    #[arg(long)]
    pub fail_fast: bool,

    /// Show what would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn into_options(self) -> ConvertOptions {
        ConvertOptions {
            source: self.source,
            target: self.target,
            input_formats: self.input_formats,
            output_formats: self.output_formats,
            widths: self.widths,
            enlarge: self.enlarge,
            clear: self.clear,
            verbose: self.verbose,
            debug: self.debug,
            quality: self.quality,
            optimize_png: !self.no_png_optimize,
            threads: self.threads,
            fail_fast: self.fail_fast,
            dry_run: self.dry_run,
        }
    }
}
