//! huffzip: a Huffman coding file compressor.
//!
//! Provides lossless compression and decompression of arbitrary byte streams using one Huffman
//! code tree per stream. The tree travels in the stream header, so a compressed file describes
//! itself completely.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffzip -z test.txt`
//!
//! This will compress the file and create the file test.txt.hf.
//! The original file will be deleted unless -k is given.
//!
//! The codec itself works on any pair of bit streams:
//!
//! ```
//! use std::io::Cursor;
//! use huffzip::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
//! use huffzip::{compress, decompress};
//!
//! let mut packed = BitWriter::new(Vec::new());
//! compress(&mut BitReader::new(Cursor::new(b"AABA".to_vec())), &mut packed).unwrap();
//!
//! let mut plain = BitWriter::new(Vec::new());
//! decompress(&mut BitReader::new(Cursor::new(packed.into_inner())), &mut plain).unwrap();
//! assert_eq!(plain.into_inner(), b"AABA");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::compress;
pub use compression::decompress::decompress;
pub use compression::CodecStats;
pub use error::HuffError;
