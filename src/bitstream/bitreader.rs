//! BitReader: reads a packed bitstream for huffzip.
//!
//! NOTE: This module can read from any I/O source that supports read() and seek(). Seek is
//! only used by rewind(), which the compressor needs between its counting and encoding passes.
//!
use std::io::{self, Read, Seek, SeekFrom};

use super::BitInput;

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads bits from a buffered source.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    /// Valid bytes in the buffer
    filled: usize,
    /// Next unread byte in the buffer
    cursor: usize,
    /// Bits pulled from the buffer but not yet handed out, right-aligned
    queue: u64,
    /// Count of valid bits in the queue
    q_bits: u8,
    bits_read: u64,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader with a 64k buffer.
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            filled: 0,
            cursor: 0,
            queue: 0,
            q_bits: 0,
            bits_read: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> io::Result<bool> {
        if self.cursor < self.filled {
            return Ok(true);
        }
        loop {
            match self.source.read(&mut self.buffer) {
                Ok(size) => {
                    self.filled = size;
                    self.cursor = 0;
                    return Ok(size > 0);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Return the next n bits (1..=32), or None if fewer than n bits are left.
    pub fn bint(&mut self, n: u8) -> io::Result<Option<u32>> {
        debug_assert!((1..=32).contains(&n), "bit width {} out of range", n);
        // Top up the queue a byte at a time. At most 31 + 8 bits are ever queued.
        while self.q_bits < n {
            if !self.have_data()? {
                return Ok(None);
            }
            self.queue = (self.queue << 8) | self.buffer[self.cursor] as u64;
            self.cursor += 1;
            self.q_bits += 8;
        }
        self.q_bits -= n;
        let result = (self.queue >> self.q_bits) & (u64::MAX >> (64 - n as u32));
        self.queue &= (1_u64 << self.q_bits) - 1;
        self.bits_read += n as u64;
        Ok(Some(result as u32))
    }

}

impl<R: Read + Seek> BitInput for BitReader<R> {
    fn read_bits(&mut self, width: u8) -> io::Result<Option<u32>> {
        self.bint(width)
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.source.seek(SeekFrom::Start(0))?;
        self.filled = 0;
        self.cursor = 0;
        self.queue = 0;
        self.q_bits = 0;
        Ok(())
    }

    fn bits_read(&self) -> u64 {
        self.bits_read
    }
}
