use std::io::{self, Write};

use log::trace;

use super::BitOutput;

/// Bytes collected before they are pushed to the writer.
const BUFFER_SIZE: usize = 64 * 1024;

/// Writes a bitstream for output. Bits are queued, packed into bytes in an output buffer, and
/// written out whenever the buffer fills up and on close().
pub struct BitWriter<W: Write> {
    /// Output buffer used to write the bitstream.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Bits accepted through write_bits, padding excluded.
    bits_written: u64,
    /// Set once close() has padded and flushed the stream.
    closed: bool,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter around any writer. Call close() when done or the last bits stay
    /// in the queue.
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            queue: 0,
            q_bits: 0,
            bits_written: 0,
            closed: false,
            writer,
        }
    }

    /// Move every complete byte from the queue to the output buffer, and the buffer to the
    /// writer once it is full.
    fn push_queue(&mut self) -> io::Result<()> {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
        self.queue &= (1_u64 << self.q_bits) - 1;
        if self.output.len() >= BUFFER_SIZE {
            self.writer.write_all(&self.output)?;
            self.output.clear();
        }
        Ok(())
    }

    /// Writes the low `depth` bits of data, most significant first.
    pub fn out(&mut self, depth: u8, data: u32) -> io::Result<()> {
        debug_assert!((1..=32).contains(&depth), "bit width {} out of range", depth);
        debug_assert!(!self.closed, "write after close");
        // Queue never holds more than 7 bits here, so 32 more always fit.
        self.queue <<= depth;
        self.queue |= data as u64 & (u64::MAX >> (64 - depth as u32));
        self.q_bits += depth;
        self.bits_written += depth as u64;
        self.push_queue()
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// significant bits, then writes the buffer out.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.q_bits > 0 {
            trace!("Padding last byte with {} zero bits", 8 - self.q_bits);
            let byte = (self.queue << (8 - self.q_bits)) as u8;
            self.output.push(byte);
            self.queue = 0;
            self.q_bits = 0;
        }
        self.writer.write_all(&self.output)?;
        self.output.clear();
        self.writer.flush()
    }

    /// Give back the underlying writer. Anything not yet closed is lost.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> BitOutput for BitWriter<W> {
    fn write_bits(&mut self, width: u8, value: u32) -> io::Result<()> {
        self.out(width, value)
    }

    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.flush()
    }

    fn bits_written(&self) -> u64 {
        self.bits_written
    }
}
