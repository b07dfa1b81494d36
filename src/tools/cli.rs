use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip or Unzip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman coding file compressor",
    long_about = "
    Compresses each file into <file>.hf using a single Huffman code tree built from the byte
    counts of the whole file. The tree is stored at the front of the compressed file, so
    decompression needs nothing but the .hf file itself."
)]
pub struct Args {
    /// Files to process
    #[clap(required = true)]
    files: Vec<String>,

    /// Compress the input files (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Keep (don't delete) input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Write to standard output, keeping the input files
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Be verbose (repeat for more, up to -vvvv). Release builds stop at warnings
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,

    /// Suppress all messages, errors included
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

impl From<Args> for HuffOpts {
    fn from(args: Args) -> Self {
        let verbose = match (args.quiet, args.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Errors,
            (false, 1) => Verbosity::Warnings,
            (false, 2) => Verbosity::Info,
            (false, 3) => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        Self {
            files: args.files,
            force_overwrite: args.force,
            keep_input_files: args.keep || args.stdout,
            op_mode: if args.decompress { Mode::Unzip } else { Mode::Zip },
            output: if args.stdout { Output::Stdout } else { Output::File },
            verbose,
        }
    }
}

/// Parse the command line, set the log level and report what we are about to do.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    info!("---- huffzip initialization ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Output goes to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    opts
}
