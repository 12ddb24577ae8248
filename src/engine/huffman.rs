use std::collections::BinaryHeap;
use std::cmp::Ordering;

use crate::engine::frequency::FrequencyTable;

/// A node of the Huffman tree. Children are owned; there are no back links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Queue entry ordered by `(freq, seq)`, smallest first.
///
/// Leaves get `seq` in ascending symbol order, merged nodes get the next
/// free number, so equal weights always pop in the same order.
struct QueueEntry {
    freq: u64,
    seq: usize,
    node: Node,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap
        (other.freq, other.seq).cmp(&(self.freq, self.seq))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Option<Node>,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// The first node popped becomes the left child. An empty table gives an
    /// empty tree and a single symbol gives a lone leaf root.
    pub fn build(freq: &FrequencyTable) -> Self {
        let mut heap = BinaryHeap::with_capacity(freq.len());
        for (seq, (symbol, count)) in freq.iter().enumerate() {
            heap.push(QueueEntry {
                freq: count,
                seq,
                node: Node::Leaf { symbol, freq: count },
            });
        }

        let mut next_seq = heap.len();
        loop {
            let Some(left) = heap.pop() else {
                return Self { root: None };
            };
            let Some(right) = heap.pop() else {
                return Self { root: Some(left.node) };
            };

            let node = Node::merge(left.node, right.node);
            heap.push(QueueEntry {
                freq: node.freq(),
                seq: next_seq,
                node,
            });
            next_seq += 1;
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total weight, i.e. the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.as_ref().map_or(0, Node::freq)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|(node, _)| node.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes().filter(|(node, _)| !node.is_leaf()).count()
    }

    /// Depth of the deepest leaf. A lone leaf root has depth 0.
    pub fn depth(&self) -> usize {
        self.nodes()
            .filter(|(node, _)| node.is_leaf())
            .map(|(_, depth)| depth)
            .max()
            .unwrap_or(0)
    }

    /// Pre-order walk yielding each node with its depth.
    ///
    /// Uses an explicit stack since skewed inputs produce near-linear trees.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self.root.iter().map(|root| (root, 0)).collect(),
        }
    }
}

pub struct Nodes<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        if let Node::Internal { left, right, .. } = node {
            self.stack.push((right, depth + 1));
            self.stack.push((left, depth + 1));
        }
        Some((node, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8, freq: u64) -> Node {
        Node::Leaf { symbol, freq }
    }

    #[test]
    fn abracadabra_shape() {
        let tree = HuffmanTree::build(&FrequencyTable::build(b"abracadabra"));
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.internal_count(), 4);
        assert_eq!(tree.weight(), 11);

        // c:1 + d:1 -> 2 (seq 5); b:2 + r:2 -> 4 (seq 6);
        // (cd):2 + (br):4 -> 6; a:5 + 6 -> 11.
        let cd = Node::merge(leaf(b'c', 1), leaf(b'd', 1));
        let br = Node::merge(leaf(b'b', 2), leaf(b'r', 2));
        let expected = Node::merge(leaf(b'a', 5), Node::merge(cd, br));
        assert_eq!(tree.root(), Some(&expected));
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn internal_frequency_is_sum_of_children() {
        let tree = HuffmanTree::build(&FrequencyTable::build(
            b"the quick brown fox jumps over the lazy dog",
        ));
        for (node, _) in tree.nodes() {
            if let Node::Internal { freq, left, right } = node {
                assert_eq!(*freq, left.freq() + right.freq());
            }
        }
    }

    #[test]
    fn empty_table_gives_empty_tree() {
        let tree = HuffmanTree::build(&FrequencyTable::default());
        assert!(tree.is_empty());
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn single_symbol_is_a_lone_leaf() {
        let tree = HuffmanTree::build(&FrequencyTable::build(b"aaaa"));
        assert_eq!(tree.root(), Some(&leaf(b'a', 4)));
        assert_eq!(tree.internal_count(), 0);
    }

    #[test]
    fn ties_break_by_symbol_then_merge_order() {
        // All weights equal: a+b first, then c+d, then the two pairs.
        let tree = HuffmanTree::build(&FrequencyTable::build(b"abcd"));
        let ab = Node::merge(leaf(b'a', 1), leaf(b'b', 1));
        let cd = Node::merge(leaf(b'c', 1), leaf(b'd', 1));
        assert_eq!(tree.root(), Some(&Node::merge(ab, cd)));
    }

    #[test]
    fn skewed_weights_build_a_deep_tree() {
        // Fibonacci weights force one new level per merge.
        let mut fib = vec![1u64, 1];
        while fib.len() < 40 {
            let n = fib[fib.len() - 1] + fib[fib.len() - 2];
            fib.push(n);
        }
        let table =
            FrequencyTable::from_counts(fib.iter().enumerate().map(|(i, &f)| (i as u8, f)))
                .unwrap();
        let tree = HuffmanTree::build(&table);
        assert_eq!(tree.depth(), 39);
        assert_eq!(tree.leaf_count(), 40);
    }
}
