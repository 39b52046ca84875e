//! Huffman tree construction, code assignment, and pre-order serialization.
//!
//! The tree lives in an arena: a contiguous node vector with index-based
//! children. Lifetimes are strictly nested (the root owns everything), so
//! per-node heap allocation would buy nothing.

use krunch_core::bitstream::{BitReader, BitWriter};
use krunch_core::error::{KrunchError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Hard ceiling on deserialized tree size: 256 leaves plus 255 internal
/// nodes. Anything larger cannot have come from a byte-frequency table.
pub(crate) const MAX_TREE_NODES: usize = 511;

/// One node in the arena. Internal nodes always carry both children.
#[derive(Debug, Clone, Copy)]
pub enum TreeNode {
    /// Terminal node carrying a byte value.
    Leaf(u8),
    /// Binary choice; indices point into the owning arena.
    Internal {
        /// Child reached on a 0 bit.
        left: u32,
        /// Child reached on a 1 bit.
        right: u32,
    },
}

/// A code word assigned to one byte value.
///
/// `bits` holds the code right-aligned; the first bit of the code is bit
/// `len - 1`. Code lengths stay well under 64 for any frequency table whose
/// counts sum to a 32-bit file size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    /// The code word, right-aligned.
    pub bits: u64,
    /// Number of significant bits; 0 means the byte has no code.
    pub len: u8,
}

/// Code words for all byte values present in the source tree.
#[derive(Debug)]
pub struct CodeTable {
    codes: [Code; 256],
}

impl CodeTable {
    /// Code for `byte`, or `None` when the byte did not occur in the input.
    pub fn get(&self, byte: u8) -> Option<Code> {
        let code = self.codes[byte as usize];
        (code.len > 0).then_some(code)
    }
}

/// Priority-queue entry used during construction.
///
/// `BinaryHeap` is a max-heap, so the ordering is written to pop the node
/// with the lowest frequency first. On equal frequency the node with the
/// larger byte value pops first (internal nodes carry byte 0 and therefore
/// lose frequency ties to leaves); remaining ties fall back to creation
/// order. The ordering must stay exactly this or serialized trees stop
/// matching across runs.
#[derive(Debug)]
struct HeapEntry {
    freq: u64,
    byte: u8,
    seq: u32,
    node: u32,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| self.byte.cmp(&other.byte))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

/// An owning Huffman tree.
#[derive(Debug)]
pub struct HuffmanTree {
    nodes: Vec<TreeNode>,
    root: u32,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// Fails with [`KrunchError::EmptyInput`] when every count is zero.
    pub fn from_frequencies(freqs: &[u64; 256]) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut heap = BinaryHeap::new();
        let mut seq = 0u32;

        for (byte, &freq) in freqs.iter().enumerate() {
            if freq > 0 {
                let node = nodes.len() as u32;
                nodes.push(TreeNode::Leaf(byte as u8));
                heap.push(HeapEntry {
                    freq,
                    byte: byte as u8,
                    seq,
                    node,
                });
                seq += 1;
            }
        }

        if heap.is_empty() {
            return Err(KrunchError::EmptyInput);
        }

        while heap.len() > 1 {
            // First popped becomes the right child, second the left.
            let right = heap.pop().expect("heap holds more than one entry");
            let left = heap.pop().expect("heap holds more than one entry");

            let node = nodes.len() as u32;
            nodes.push(TreeNode::Internal {
                left: left.node,
                right: right.node,
            });
            heap.push(HeapEntry {
                freq: left.freq + right.freq,
                byte: 0,
                seq,
                node,
            });
            seq += 1;
        }

        let root = heap.pop().expect("heap holds the final entry").node;
        Ok(Self { nodes, root })
    }

    #[inline]
    fn node(&self, idx: u32) -> TreeNode {
        self.nodes[idx as usize]
    }

    /// True when the tree is the degenerate single-leaf case.
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.node(self.root), TreeNode::Leaf(_))
    }

    /// Derive the code table by one depth-first traversal: "0" descending
    /// left, "1" descending right.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = [Code::default(); 256];
        match self.node(self.root) {
            // A tree with one distinct byte gets the literal code "0".
            TreeNode::Leaf(byte) => codes[byte as usize] = Code { bits: 0, len: 1 },
            TreeNode::Internal { .. } => self.assign_codes(self.root, 0, 0, &mut codes),
        }
        CodeTable { codes }
    }

    fn assign_codes(&self, idx: u32, bits: u64, len: u8, codes: &mut [Code; 256]) {
        match self.node(idx) {
            TreeNode::Leaf(byte) => codes[byte as usize] = Code { bits, len },
            TreeNode::Internal { left, right } => {
                self.assign_codes(left, bits << 1, len + 1, codes);
                self.assign_codes(right, (bits << 1) | 1, len + 1, codes);
            }
        }
    }

    /// Write the pre-order tree shape: `1` plus the 8-bit byte value for a
    /// leaf, `0` followed by the left then right subtree for an internal
    /// node.
    pub fn serialize(&self, writer: &mut BitWriter) -> Result<()> {
        self.serialize_node(self.root, writer)
    }

    fn serialize_node(&self, idx: u32, writer: &mut BitWriter) -> Result<()> {
        match self.node(idx) {
            TreeNode::Leaf(byte) => {
                writer.write_bit(true)?;
                writer.write_bits(u32::from(byte), 8)?;
            }
            TreeNode::Internal { left, right } => {
                writer.write_bit(false)?;
                self.serialize_node(left, writer)?;
                self.serialize_node(right, writer)?;
            }
        }
        Ok(())
    }

    /// Rebuild a tree from a pre-order bit stream of exactly `tree_bits`
    /// significant bits. Padding past `tree_bits` is never consumed as
    /// structure.
    pub fn deserialize(reader: &mut BitReader<'_>, tree_bits: u64) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut used = 0u64;
        let root = Self::deserialize_node(reader, tree_bits, &mut used, &mut nodes)?;
        Ok(Self { nodes, root })
    }

    fn deserialize_node(
        reader: &mut BitReader<'_>,
        tree_bits: u64,
        used: &mut u64,
        nodes: &mut Vec<TreeNode>,
    ) -> Result<u32> {
        if nodes.len() >= MAX_TREE_NODES {
            return Err(KrunchError::corrupt_payload(
                "serialized tree exceeds the 511-node limit",
            ));
        }
        if *used + 1 > tree_bits {
            return Err(KrunchError::truncated_tree(*used + 1, tree_bits));
        }
        let is_leaf = reader.read_bit()?;
        *used += 1;

        if is_leaf {
            if *used + 8 > tree_bits {
                return Err(KrunchError::truncated_tree(*used + 8, tree_bits));
            }
            let byte = reader.read_bits(8)? as u8;
            *used += 8;
            let idx = nodes.len() as u32;
            nodes.push(TreeNode::Leaf(byte));
            Ok(idx)
        } else {
            let idx = nodes.len() as u32;
            nodes.push(TreeNode::Internal { left: 0, right: 0 });
            let left = Self::deserialize_node(reader, tree_bits, used, nodes)?;
            let right = Self::deserialize_node(reader, tree_bits, used, nodes)?;
            nodes[idx as usize] = TreeNode::Internal { left, right };
            Ok(idx)
        }
    }

    /// Walk the tree one payload bit at a time and return the byte at the
    /// leaf reached. The degenerate single-leaf tree consumes one bit per
    /// byte, mirroring its one-bit code.
    pub fn decode_symbol(&self, reader: &mut BitReader<'_>) -> Result<u8> {
        let mut idx = self.root;
        if let TreeNode::Leaf(byte) = self.node(idx) {
            reader.read_bit()?;
            return Ok(byte);
        }
        loop {
            match self.node(idx) {
                TreeNode::Internal { left, right } => {
                    idx = if reader.read_bit()? { right } else { left };
                }
                TreeNode::Leaf(byte) => return Ok(byte),
            }
        }
    }
}
