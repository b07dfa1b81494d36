/// One node of a code tree. A `Kids` node always has exactly two children, and a `Leaf` holds a
/// symbol in 0..=256.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Node {
    Kids(Box<Node>, Box<Node>),
    Leaf(u16),
}

impl Node {
    /// Join two subtrees under a new internal node.
    pub fn join(left: Node, right: Node) -> Node {
        Node::Kids(Box::new(left), Box::new(right))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Follow one bit of a code: 0 goes left, anything else goes right. Leaves have no children.
    pub fn child(&self, bit: u32) -> Option<&Node> {
        match self {
            Node::Kids(left, right) => Some(if bit == 0 { &**left } else { &**right }),
            Node::Leaf(_) => None,
        }
    }

    /// Count the leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Kids(left, right) => left.leaf_count() + right.leaf_count(),
            Node::Leaf(_) => 1,
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Kids(left, right) => 1 + left.depth().max(right.depth()),
            Node::Leaf(_) => 0,
        }
    }
}
