use std::fs::File;
use std::io;

use log::{debug, info, warn};

use super::{close_after, discard_output, finish_input, open_output};
use super::{CodecStats, BITS_PER_INT, HUFF_SUFFIX, HUFF_TREE};
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::bitstream::{BitInput, BitOutput};
use crate::error::HuffError;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::tree_builder::build_tree;
use crate::huffman_coding::tree_header::write_header;
use crate::huffman_coding::{BITS_PER_WORD, PSEUDO_EOF};
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::freqs;

/// Compress everything in `input` to `output`. The input is read twice (once to count, once to
/// encode) and the output is closed before returning, even on error.
pub fn compress<I: BitInput, O: BitOutput>(
    input: &mut I,
    output: &mut O,
) -> Result<CodecStats, HuffError> {
    close_after(output, |output| encode(input, output))
}

fn encode<I: BitInput, O: BitOutput>(
    input: &mut I,
    output: &mut O,
) -> Result<CodecStats, HuffError> {
    let counts = freqs(input)?;
    let root = build_tree(&counts);
    let codes = CodeTable::from_tree(&root);
    debug!(
        "{} distinct bytes in {} total",
        counts.iter().filter(|&&count| count > 0).count(),
        counts.iter().sum::<u64>()
    );

    output.write_bits(BITS_PER_INT, HUFF_TREE)?;
    write_header(&root, output)?;

    input.rewind()?;
    let start = input.bits_read();
    while let Some(byte) = input.read_bits(BITS_PER_WORD)? {
        let sym = byte as u16;
        codes
            .get(sym)
            .ok_or(HuffError::UnknownSymbol(sym))?
            .write(output)?;
    }
    codes
        .get(PSEUDO_EOF)
        .ok_or(HuffError::UnknownSymbol(PSEUDO_EOF))?
        .write(output)?;

    Ok(CodecStats {
        bits_read: input.bits_read() - start,
        bits_written: output.bits_written(),
    })
}

/// Compress one file to `<name>.hf` (or stdout). The input is removed afterwards unless kept.
pub fn compress_file(opts: &HuffOpts, name: &str) -> io::Result<()> {
    if name.ends_with(HUFF_SUFFIX) {
        warn!("{} already has {} suffix, skipping", name, HUFF_SUFFIX);
        return Ok(());
    }
    let out_name = format!("{}{}", name, HUFF_SUFFIX);

    let mut br = BitReader::new(File::open(name)?);
    let mut bw = BitWriter::new(open_output(opts, &out_name)?);

    match compress(&mut br, &mut bw) {
        Ok(stats) => {
            info!(
                "{}: {} bytes in, {} bytes out ({:.1}%)",
                name,
                stats.bits_read / 8,
                (stats.bits_written + 7) / 8,
                stats.ratio()
            );
            finish_input(opts, name)
        }
        Err(e) => {
            discard_output(opts, &out_name);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod test {
    use super::compress;
    use crate::bitstream::bitreader::BitReader;
    use crate::bitstream::bitwriter::BitWriter;
    use crate::bitstream::BitInput;
    use crate::error::HuffError;
    use crate::huffman_coding::code_table::CodeTable;
    use crate::huffman_coding::tree_builder::build_tree;
    use crate::huffman_coding::PSEUDO_EOF;
    use std::io::{self, Cursor};

    /// Four bytes of `first` until rewound, then four bytes of `second`.
    struct Changing {
        first: u8,
        second: u8,
        rewound: bool,
        left: usize,
        bits_read: u64,
    }

    impl BitInput for Changing {
        fn read_bits(&mut self, width: u8) -> io::Result<Option<u32>> {
            assert_eq!(width, 8);
            if self.left == 0 {
                return Ok(None);
            }
            self.left -= 1;
            self.bits_read += 8;
            let byte = if self.rewound { self.second } else { self.first };
            Ok(Some(byte as u32))
        }

        fn rewind(&mut self) -> io::Result<()> {
            self.rewound = true;
            self.left = 4;
            Ok(())
        }

        fn bits_read(&self) -> u64 {
            self.bits_read
        }
    }

    fn squeeze(data: &[u8]) -> Vec<u8> {
        let mut br = BitReader::new(Cursor::new(data.to_vec()));
        let mut bw = BitWriter::new(Vec::new());
        compress(&mut br, &mut bw).unwrap();
        bw.into_inner()
    }

    #[test]
    fn aaba_output_test() {
        // magic, 32 header bits, then 1 1 00 1 01 and one padding bit
        assert_eq!(
            squeeze(&[65, 65, 66, 65]),
            vec![0xfa, 0xce, 0x82, 0x01, 0x24, 0x2c, 0x02, 0x41, 0b1100_1010]
        );
    }

    #[test]
    fn empty_output_test() {
        // magic, then 0 1 000000000 1 100000000 for the filler and end-of-block leaves,
        // then the one bit end-of-block code
        assert_eq!(
            squeeze(&[]),
            vec![0xfa, 0xce, 0x82, 0x01, 0b0100_0000, 0b0001_1000, 0b0000_0100]
        );
    }

    #[test]
    fn repeated_byte_test() {
        let data = vec![b'x'; 1000];
        let mut counts = [0_u64; 256];
        counts[b'x' as usize] = 1000;
        let codes = CodeTable::from_tree(&build_tree(&counts));
        assert_eq!(codes.len(), 2);
        let x_len = codes.get(b'x' as u16).map(|c| c.len());
        let eob_len = codes.get(PSEUDO_EOF).map(|c| c.len());
        assert_eq!((x_len, eob_len), (Some(1), Some(1)));

        // 32 magic + 21 header + 1000 codes + 1 end-of-block bits
        assert_eq!(squeeze(&data).len(), (32 + 21 + 1000 + 1 + 7) / 8);
    }

    #[test]
    fn stats_test() {
        let mut br = BitReader::new(Cursor::new(b"AABA".to_vec()));
        let mut bw = BitWriter::new(Vec::new());
        let stats = compress(&mut br, &mut bw).unwrap();
        assert_eq!(stats.bits_read, 32);
        assert_eq!(stats.bits_written, 32 + 32 + 7);
    }

    #[test]
    fn input_changed_between_passes_test() {
        let mut input = Changing {
            first: b'A',
            second: b'Z',
            rewound: false,
            left: 4,
            bits_read: 0,
        };
        let mut bw = BitWriter::new(Vec::new());
        let result = compress(&mut input, &mut bw);
        assert!(matches!(result, Err(HuffError::UnknownSymbol(90))));

        // The output was still closed: magic plus the 21 bit header reached the writer
        let out = bw.into_inner();
        assert_eq!(out.len(), (32 + 21 + 7) / 8);
        assert_eq!(&out[..4], &[0xfa, 0xce, 0x82, 0x01]);
    }
}
