use std::fmt::{self, Display, Formatter};
use std::io;

use log::{debug, log_enabled, trace, Level};
use rustc_hash::FxHashMap;

use super::node::Node;
use crate::bitstream::BitOutput;

/// Longest run of code bits handed to the bit writer in one call.
const MAX_WRITE: usize = 32;

/// The path from the root to one leaf. `false` is a step left, `true` a step right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    path: Vec<bool>,
}

impl Code {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.path
    }

    /// Put the code on the stream. Deep trees can have codes wider than one write, so long codes
    /// go out 32 bits at a time.
    pub fn write<O: BitOutput>(&self, out: &mut O) -> io::Result<()> {
        for chunk in self.path.chunks(MAX_WRITE) {
            let value = chunk
                .iter()
                .fold(0_u32, |acc, &bit| (acc << 1) | bit as u32);
            out.write_bits(chunk.len() as u8, value)?;
        }
        Ok(())
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for &bit in &self.path {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Maps every symbol in a tree to its code.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: FxHashMap<u16, Code>,
}

impl CodeTable {
    /// Walk the tree and record the path to every leaf.
    pub fn from_tree(root: &Node) -> Self {
        let mut table = CodeTable::default();
        let mut path = Vec::new();
        table.collect(root, &mut path);
        debug!(
            "{} codes, longest is {} bits",
            table.len(),
            table.codes.values().map(Code::len).max().unwrap_or(0)
        );
        if log_enabled!(Level::Trace) {
            for (sym, code) in table.sorted() {
                trace!("Code for {:>3} is {}", sym, code);
            }
        }
        table
    }

    /// Recursively walk the tree, pushing 0 for left and 1 for right on the way down.
    fn collect(&mut self, node: &Node, path: &mut Vec<bool>) {
        match node {
            Node::Kids(left, right) => {
                path.push(false);
                self.collect(left, path);
                path.pop();
                path.push(true);
                self.collect(right, path);
                path.pop();
            }
            Node::Leaf(sym) => {
                self.codes.insert(*sym, Code { path: path.clone() });
            }
        }
    }

    pub fn get(&self, sym: u16) -> Option<&Code> {
        self.codes.get(&sym)
    }

    /// Number of symbols with a code.
    pub(crate) fn len(&self) -> usize {
        self.codes.len()
    }

    /// All (symbol, code) pairs in symbol order.
    pub fn sorted(&self) -> Vec<(u16, &Code)> {
        let mut entries: Vec<(u16, &Code)> = self.codes.iter().map(|(&s, c)| (s, c)).collect();
        entries.sort_unstable_by_key(|&(sym, _)| sym);
        entries
    }
}
