use std::io;

use thiserror::Error;

/// Everything that can stop a compress or decompress run. None of these are retried.
#[derive(Debug, Error)]
pub enum HuffError {
    /// The first 32 bits are not the huffzip magic number.
    #[error("illegal header starts with {0:#010x}")]
    BadMagic(u32),
    /// Input ran out while the magic number or the tree header was being read.
    #[error("input ended inside the tree header")]
    TruncatedHeader,
    /// Input ran out before the end-of-block code.
    #[error("no end-of-block code before end of input")]
    TruncatedStream,
    /// The tree header decoded into something no compressor could have written.
    #[error("malformed tree header: {0}")]
    MalformedHeader(&'static str),
    /// A byte showed up in the encoding pass that the counting pass never saw.
    #[error("symbol {0} has no code; did the input change between passes?")]
    UnknownSymbol(u16),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<HuffError> for io::Error {
    fn from(e: HuffError) -> Self {
        match e {
            HuffError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
mod test {
    use super::HuffError;
    use std::io;

    #[test]
    fn display_test() {
        assert_eq!(
            HuffError::BadMagic(0x1234).to_string(),
            "illegal header starts with 0x00001234"
        );
        assert_eq!(
            HuffError::MalformedHeader("root is a leaf").to_string(),
            "malformed tree header: root is a leaf"
        );
    }

    #[test]
    fn into_io_error_test() {
        let e: io::Error = HuffError::TruncatedStream.into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);

        let inner = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: io::Error = HuffError::from(inner).into();
        assert_eq!(e.kind(), io::ErrorKind::NotFound);
    }
}
