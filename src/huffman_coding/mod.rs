//! The huffman module builds, describes and serializes the code tree used by huffzip.
//!
//! One tree covers the whole input. The compressor counts every byte, builds the tree from the
//! counts, and writes the tree itself at the front of the output so the decompressor never has to
//! agree with the compressor on how ties between equal weights were broken. It just reads back
//! the exact shape that was used.
//!
//! The alphabet is the 256 byte values plus one end-of-block symbol (256). The end-of-block code
//! is always the last code in a stream.
//!

pub mod code_table;
pub mod node;
pub mod tree_builder;
pub mod tree_header;

/// Number of bits in one literal symbol.
pub const BITS_PER_WORD: u8 = 8;
/// Number of literal byte values.
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;
/// End-of-block symbol, one past the last byte value.
pub const PSEUDO_EOF: u16 = ALPH_SIZE as u16;
/// Bits used for a leaf symbol in the tree header. Wide enough for PSEUDO_EOF.
pub const SYMBOL_BITS: u8 = BITS_PER_WORD + 1;
/// Largest possible leaf count: every byte value plus the end-of-block symbol.
pub const MAX_LEAVES: usize = ALPH_SIZE + 1;
/// Deepest leaf a tree of MAX_LEAVES leaves can have.
pub const MAX_DEPTH: usize = MAX_LEAVES - 1;
