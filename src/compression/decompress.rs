use std::fs::File;
use std::io;

use log::{error, info};

use super::{close_after, discard_output, finish_input, open_output};
use super::{CodecStats, BITS_PER_INT, HUFF_SUFFIX, HUFF_TREE, UNHUFF_SUFFIX};
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::bitstream::{BitInput, BitOutput};
use crate::error::HuffError;
use crate::huffman_coding::node::Node;
use crate::huffman_coding::tree_header::read_header;
use crate::huffman_coding::{BITS_PER_WORD, PSEUDO_EOF};
use crate::tools::cli::HuffOpts;

/// Decompress a stream written by compress. The output is closed before returning, even on
/// error, and holds whatever was decoded up to the error.
pub fn decompress<I: BitInput, O: BitOutput>(
    input: &mut I,
    output: &mut O,
) -> Result<CodecStats, HuffError> {
    close_after(output, |output| decode(input, output))
}

fn decode<I: BitInput, O: BitOutput>(
    input: &mut I,
    output: &mut O,
) -> Result<CodecStats, HuffError> {
    let magic = input
        .read_bits(BITS_PER_INT)?
        .ok_or(HuffError::TruncatedHeader)?;
    if magic != HUFF_TREE {
        error!("Not a huffzip stream, header starts with {:#010x}", magic);
        return Err(HuffError::BadMagic(magic));
    }
    info!("Found a valid huffzip signature.");

    let root = read_header(input)?;

    // Walk down from the root one bit at a time. Every leaf but end-of-block is a byte of
    // output and sends the walk back to the root.
    let mut current = &root;
    loop {
        let bit = input.read_bits(1)?.ok_or(HuffError::TruncatedStream)?;
        current = current
            .child(bit)
            .ok_or(HuffError::MalformedHeader("root is a leaf"))?;
        if let Node::Leaf(sym) = current {
            if *sym == PSEUDO_EOF {
                break;
            }
            output.write_bits(BITS_PER_WORD, *sym as u32)?;
            current = &root;
        }
    }

    Ok(CodecStats {
        bits_read: input.bits_read(),
        bits_written: output.bits_written(),
    })
}

/// Output name for a compressed file: strip ".hf", or add ".uhf" if it is not there.
pub fn unhuff_name(name: &str) -> String {
    match name.strip_suffix(HUFF_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}{}", name, UNHUFF_SUFFIX),
    }
}

/// Decompress one file (or to stdout). The input is removed afterwards unless kept.
pub fn decompress_file(opts: &HuffOpts, name: &str) -> io::Result<()> {
    let out_name = unhuff_name(name);

    let mut br = BitReader::new(File::open(name)?);
    let mut bw = BitWriter::new(open_output(opts, &out_name)?);

    match decompress(&mut br, &mut bw) {
        Ok(stats) => {
            info!(
                "{}: {} bytes in, {} bytes out",
                name,
                (stats.bits_read + 7) / 8,
                stats.bits_written / 8
            );
            finish_input(opts, name)
        }
        Err(e) => {
            discard_output(opts, &out_name);
            Err(e.into())
        }
    }
}
