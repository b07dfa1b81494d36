//! Builds the code tree from a table of byte counts.
//!
//! Every byte with a non-zero count gets a leaf weighted by that count, and the end-of-block
//! symbol always gets a leaf of weight 1. The two lightest nodes are joined until one is left.
//! Equal weights are resolved by queue order: leaves go in by ascending symbol, end-of-block
//! last, and each joined node goes in behind everything already queued. The first node taken
//! becomes the left child.
//!
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use super::node::Node;
use super::{ALPH_SIZE, PSEUDO_EOF};

/// A node waiting in the build queue. Weight and queue position only matter while building.
#[derive(Debug)]
struct Weighted {
    weight: u64,
    seq: u32,
    node: Node,
}

impl PartialEq for Weighted {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl Eq for Weighted {}

impl Ord for Weighted {
    /// Reversed so the max-heap hands out the lightest, then oldest, node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for Weighted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Queue of nodes ordered by weight, then by insertion.
struct BuildQueue {
    heap: BinaryHeap<Weighted>,
    next_seq: u32,
}

impl BuildQueue {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::with_capacity(ALPH_SIZE + 2),
            next_seq: 0,
        }
    }

    fn push(&mut self, weight: u64, node: Node) {
        self.heap.push(Weighted {
            weight,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }
}

/// Build the code tree for a 256 entry frequency table. The root is always an internal node.
pub fn build_tree(counts: &[u64; ALPH_SIZE]) -> Node {
    let mut queue = BuildQueue::new();
    for (sym, &count) in counts.iter().enumerate() {
        if count > 0 {
            queue.push(count, Node::Leaf(sym as u16));
        }
    }
    queue.push(1, Node::Leaf(PSEUDO_EOF));

    // Only end-of-block is queued when the input was empty. A lone leaf as root would give it
    // an empty code, so pair it with a weightless filler leaf.
    if queue.heap.len() == 1 {
        debug!("Empty input, adding a filler leaf next to end-of-block");
        queue.push(0, Node::Leaf(0));
    }

    // Pull off the two lightest nodes and queue their parent until only the root is left.
    let root = loop {
        match (queue.heap.pop(), queue.heap.pop()) {
            (Some(left), Some(right)) => {
                let weight = left.weight + right.weight;
                queue.push(weight, Node::join(left.node, right.node));
            }
            (Some(last), None) => break last.node,
            (None, _) => unreachable!("build queue always holds at least two nodes"),
        }
    };
    debug!(
        "Built code tree with {} leaves, {} levels deep",
        root.leaf_count(),
        root.depth()
    );
    root
}
