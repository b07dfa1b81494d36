use std::io;

use crate::bitstream::BitInput;
use crate::huffman_coding::{ALPH_SIZE, BITS_PER_WORD};

/// Returns a frequency count of every byte left in the input. Reads to the end of the stream, so
/// rewind before reading it again.
pub fn freqs<I: BitInput>(input: &mut I) -> io::Result<[u64; ALPH_SIZE]> {
    let mut freqs = [0_u64; ALPH_SIZE];
    while let Some(byte) = input.read_bits(BITS_PER_WORD)? {
        freqs[byte as usize] += 1;
    }
    Ok(freqs)
}

#[cfg(test)]
mod test {
    use super::freqs;
    use crate::bitstream::bitreader::BitReader;
    use crate::bitstream::BitInput;
    use std::io::Cursor;

    #[test]
    fn count_test() {
        let mut br = BitReader::new(Cursor::new(b"Making a silly test.".to_vec()));
        let counts = freqs(&mut br).unwrap();
        assert_eq!(counts[b' ' as usize], 3);
        assert_eq!(counts[b'l' as usize], 2);
        assert_eq!(counts[b'.' as usize], 1);
        assert_eq!(counts[b'z' as usize], 0);
        assert_eq!(counts.iter().sum::<u64>(), 20);
        // The stream is used up until it is rewound.
        assert_eq!(br.read_bits(8).unwrap(), None);
        br.rewind().unwrap();
        assert_eq!(br.read_bits(8).unwrap(), Some(b'M' as u32));
    }

    #[test]
    fn empty_test() {
        let mut br = BitReader::new(Cursor::new(Vec::new()));
        assert_eq!(freqs(&mut br).unwrap(), [0; 256]);
    }

    #[test]
    fn all_bytes_test() {
        let data: Vec<u8> = (0..=255).chain(0..=255).collect();
        let mut br = BitReader::new(Cursor::new(data));
        assert!(freqs(&mut br).unwrap().iter().all(|&c| c == 2));
    }
}
