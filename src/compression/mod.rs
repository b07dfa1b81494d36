//! The compression module runs the two halves of huffzip.
//!
//! Compression happens in the following steps:
//! - Count every byte of the input.
//! - Build the code tree from the counts (plus one end-of-block symbol) and derive the codes.
//! - Write the magic number and the tree.
//! - Rewind the input and write the code for every byte, then the end-of-block code.
//!
//! Decompression reads the magic number and the tree, then walks the tree one bit at a time,
//! writing a byte every time it lands on a leaf, until it lands on end-of-block.
//!
//! The codec functions work on any BitInput/BitOutput pair. The *_file functions wrap them with
//! the file handling the binary needs.
//!
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};

use log::{info, warn};

use crate::bitstream::BitOutput;
use crate::error::HuffError;
use crate::tools::cli::{HuffOpts, Output};

pub mod compress;
pub mod decompress;

/// Identifies a huffzip stream.
pub const HUFF_NUMBER: u32 = 0xface8200;
/// Magic number of the tree-header format, the only one written or read.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;
/// Width of the magic number.
pub const BITS_PER_INT: u8 = 32;
/// Suffix added to compressed files.
pub const HUFF_SUFFIX: &str = ".hf";
/// Suffix added to decompressed files whose name did not end in HUFF_SUFFIX.
pub const UNHUFF_SUFFIX: &str = ".uhf";

/// What one compress or decompress run moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecStats {
    /// Bits consumed from the input (the encoding pass only, for compression).
    pub bits_read: u64,
    /// Bits written, not counting the padding in the last byte.
    pub bits_written: u64,
}

impl CodecStats {
    /// Output size as a percentage of input size.
    pub fn ratio(&self) -> f64 {
        if self.bits_read == 0 {
            return 0.0;
        }
        self.bits_written as f64 * 100.0 / self.bits_read as f64
    }
}

/// Run a codec body, then close the output whether it worked or not. An error from the body
/// beats an error from close.
fn close_after<O, F>(output: &mut O, body: F) -> Result<CodecStats, HuffError>
where
    O: BitOutput,
    F: FnOnce(&mut O) -> Result<CodecStats, HuffError>,
{
    let result = body(output);
    let closed = output.close();
    let stats = result?;
    closed?;
    Ok(stats)
}

/// Open the destination for one file. Existing files are only replaced with --force.
fn open_output(opts: &HuffOpts, name: &str) -> io::Result<Box<dyn Write>> {
    match opts.output {
        Output::Stdout => Ok(Box::new(io::stdout())),
        Output::File => {
            let file: File = if opts.force_overwrite {
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(name)?
            } else {
                OpenOptions::new().write(true).create_new(true).open(name)?
            };
            Ok(Box::new(file))
        }
    }
}

/// Remove the input once its output is safely written, unless asked to keep it.
fn finish_input(opts: &HuffOpts, name: &str) -> io::Result<()> {
    if opts.keep_input_files || opts.output == Output::Stdout {
        return Ok(());
    }
    info!("Removing {}", name);
    fs::remove_file(name)
}

/// Remove whatever a failed run left behind.
fn discard_output(opts: &HuffOpts, name: &str) {
    if opts.output == Output::File {
        if let Err(e) = fs::remove_file(name) {
            warn!("Could not remove partial output {}: {}", name, e);
        }
    }
}
