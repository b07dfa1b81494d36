//! The bitstream module forms the I/O subsystem for huffzip.
//!
//! The codec never touches bytes directly. Everything it reads or writes goes through the two
//! traits below, most significant bit first. Compression needs two passes over its input (one to
//! count, one to encode), so the input side must be able to rewind.
//!
//! `BitReader` and `BitWriter` are the buffered implementations used by the binary and the tests.
//!
pub mod bitreader;
pub mod bitwriter;

use std::io;

/// A source of bits, read most significant bit first.
pub trait BitInput {
    /// Read `width` (1..=32) bits and return them right-aligned in a u32. Returns Ok(None) if
    /// fewer than `width` bits are left.
    fn read_bits(&mut self, width: u8) -> io::Result<Option<u32>>;

    /// Move back to the first bit of the source.
    fn rewind(&mut self) -> io::Result<()>;

    /// Number of bits handed out since creation (rewinds included).
    fn bits_read(&self) -> u64;
}

/// A sink for bits, written most significant bit first.
pub trait BitOutput {
    /// Write the low `width` (1..=32) bits of `value`.
    fn write_bits(&mut self, width: u8, value: u32) -> io::Result<()>;

    /// Pad the last partial byte with zeros and flush everything to the underlying writer.
    /// Calling close more than once is harmless.
    fn close(&mut self) -> io::Result<()>;

    /// Number of bits accepted so far, not counting padding.
    fn bits_written(&self) -> u64;
}
