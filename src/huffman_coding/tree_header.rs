//! Writes and reads the code tree at the front of a compressed stream.
//!
//! The tree goes out in preorder. An internal node is a single 0 bit followed by its left and
//! then its right subtree. A leaf is a single 1 bit followed by its symbol in 9 bits.
//!
//! For example the tree for "AABA" (66 and end-of-block on the left, 65 on the right) is written
//! as `0 0 1 001000010 1 100000000 1 001000001`.
//!
use std::io;

use log::{debug, error};

use super::node::Node;
use super::{MAX_DEPTH, MAX_LEAVES, PSEUDO_EOF, SYMBOL_BITS};
use crate::bitstream::{BitInput, BitOutput};
use crate::error::HuffError;

/// Write the tree in preorder.
pub fn write_header<O: BitOutput>(root: &Node, out: &mut O) -> io::Result<()> {
    let start = out.bits_written();
    write_node(root, out)?;
    debug!("Tree header is {} bits", out.bits_written() - start);
    Ok(())
}

fn write_node<O: BitOutput>(node: &Node, out: &mut O) -> io::Result<()> {
    match node {
        Node::Kids(left, right) => {
            out.write_bits(1, 0)?;
            write_node(left, out)?;
            write_node(right, out)
        }
        Node::Leaf(sym) => {
            out.write_bits(1, 1)?;
            out.write_bits(SYMBOL_BITS, *sym as u32)
        }
    }
}

/// Read back a tree written by write_header. Besides running out of input, the header can fail
/// to describe a usable tree: leaf symbols above end-of-block, trees deeper or wider than the
/// alphabet allows, and a bare leaf as root are all rejected.
pub fn read_header<I: BitInput>(input: &mut I) -> Result<Node, HuffError> {
    let mut leaves = 0;
    let root = read_node(input, 0, &mut leaves)?;
    if root.is_leaf() {
        error!("Tree header holds a single leaf and no codes");
        return Err(HuffError::MalformedHeader("root is a leaf"));
    }
    debug!("Read code tree with {} leaves", leaves);
    Ok(root)
}

fn read_node<I: BitInput>(
    input: &mut I,
    depth: usize,
    leaves: &mut usize,
) -> Result<Node, HuffError> {
    if depth > MAX_DEPTH {
        return Err(HuffError::MalformedHeader("tree is deeper than the alphabet allows"));
    }
    match input.read_bits(1)?.ok_or(HuffError::TruncatedHeader)? {
        1 => {
            let sym = input
                .read_bits(SYMBOL_BITS)?
                .ok_or(HuffError::TruncatedHeader)? as u16;
            if sym > PSEUDO_EOF {
                error!("Leaf symbol {} in tree header is out of range", sym);
                return Err(HuffError::MalformedHeader("leaf symbol out of range"));
            }
            *leaves += 1;
            if *leaves > MAX_LEAVES {
                return Err(HuffError::MalformedHeader("more leaves than symbols"));
            }
            Ok(Node::Leaf(sym))
        }
        _ => {
            let left = read_node(input, depth + 1, leaves)?;
            let right = read_node(input, depth + 1, leaves)?;
            Ok(Node::join(left, right))
        }
    }
}

#[cfg(test)]
mod test {
    use super::{read_header, write_header};
    use crate::bitstream::bitreader::BitReader;
    use crate::bitstream::bitwriter::BitWriter;
    use crate::bitstream::BitOutput;
    use crate::error::HuffError;
    use crate::huffman_coding::node::Node;
    use crate::huffman_coding::tree_builder::build_tree;
    use crate::huffman_coding::PSEUDO_EOF;
    use std::io::Cursor;

    fn header_bytes(tree: &Node) -> Vec<u8> {
        let mut bw = BitWriter::new(Vec::new());
        write_header(tree, &mut bw).unwrap();
        bw.close().unwrap();
        bw.into_inner()
    }

    fn read_bytes(bytes: Vec<u8>) -> Result<Node, HuffError> {
        read_header(&mut BitReader::new(Cursor::new(bytes)))
    }

    #[test]
    fn aaba_layout_test() {
        let tree = Node::join(
            Node::join(Node::Leaf(66), Node::Leaf(PSEUDO_EOF)),
            Node::Leaf(65),
        );
        // 0 0 1 001000010 1 100000000 1 001000001, exactly four bytes
        assert_eq!(
            header_bytes(&tree),
            vec![0b0010_0100, 0b0010_1100, 0b0000_0010, 0b0100_0001]
        );
    }

    #[test]
    fn round_trip_test() {
        let mut counts = [0_u64; 256];
        for (i, count) in counts.iter_mut().enumerate().step_by(3) {
            *count = i as u64 + 1;
        }
        for tree in [build_tree(&counts), build_tree(&[0; 256]), build_tree(&[9; 256])] {
            let bytes = header_bytes(&tree);
            assert_eq!(read_bytes(bytes).unwrap(), tree);
        }
    }

    #[test]
    fn truncated_test() {
        let tree = build_tree(&[5; 256]);
        let mut bytes = header_bytes(&tree);
        bytes.truncate(bytes.len() / 2);
        assert!(matches!(read_bytes(bytes), Err(HuffError::TruncatedHeader)));
        assert!(matches!(read_bytes(vec![]), Err(HuffError::TruncatedHeader)));
        // Leaf marker with only part of its symbol
        assert!(matches!(
            read_bytes(vec![0b0100_0000]),
            Err(HuffError::TruncatedHeader)
        ));
    }

    #[test]
    fn leaf_root_test() {
        // 1 100000000: a single end-of-block leaf
        assert!(matches!(
            read_bytes(vec![0b1100_0000, 0b0000_0000]),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    #[test]
    fn symbol_out_of_range_test() {
        // 0 1 111111111 ...: first leaf claims symbol 511
        assert!(matches!(
            read_bytes(vec![0b0111_1111, 0b1111_0000, 0, 0]),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    #[test]
    fn too_deep_test() {
        // Nothing but internal node markers
        assert!(matches!(
            read_bytes(vec![0; 64]),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    /// Every leaf at the same depth, all holding symbol 0.
    fn complete(depth: u32) -> Node {
        match depth {
            0 => Node::Leaf(0),
            _ => Node::join(complete(depth - 1), complete(depth - 1)),
        }
    }

    #[test]
    fn too_many_leaves_test() {
        // 256 leaves still fit, 512 do not even though the depth is fine
        assert_eq!(read_bytes(header_bytes(&complete(8))).unwrap(), complete(8));
        assert!(matches!(
            read_bytes(header_bytes(&complete(9))),
            Err(HuffError::MalformedHeader("more leaves than symbols"))
        ));
    }
}
