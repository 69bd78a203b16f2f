#![doc = include_str!("../README.md")]

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use dyn_size_of::GetSize;

mod code;
pub use code::Code;
mod codes;
pub use codes::{CodeTable, CodesIterator};
mod decoder;
pub use decoder::Decoder;
mod frequencies;
pub use frequencies::{Frequencies, FrequencyTable};
mod session;
pub use session::Session;

/// Errors reported by encoding and decoding.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HuffmanError {
    /// The tree cannot be built for no values.
    #[error("cannot build the tree for empty input")]
    EmptyInput,
    /// The value at the given position of the encoded sequence has no codeword.
    #[error("value at position {position} has no codeword")]
    UnknownSymbol { position: usize },
    /// The bit (or non-binary character) at the given position does not match the tree.
    #[error("bit at position {position} does not match the tree")]
    MalformedBitstream { position: usize },
    /// The bits end inside a codeword, after `consumed` bits of it.
    #[error("bits end inside a codeword, after {consumed} bits of it")]
    TruncatedBitstream { consumed: u32 },
    /// There is no tree to decode with, since nothing has been encoded.
    #[error("no tree to decode with")]
    MissingTree,
}

/// Result of bit decoding returned by `consume` method of [`Decoder`].
#[derive(PartialOrd, Ord, PartialEq, Eq, Debug, Clone, Hash)]
pub enum DecodingResult<T> {
    /// Completed value that has been successfully decoded.
    Value(T),
    /// The codeword is incomplete and the next bit is needed.
    Incomplete,
    /// The bit does not correspond to any node of the tree.
    Invalid
}

/// Node of the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<V> {
    /// Leaf that holds a value and the number of its occurrences.
    Leaf { value: V, weight: u64 },
    /// Internal node that owns exactly two children.
    /// Its weight is the sum of the weights of its children.
    Internal { weight: u64, left: Box<Node<V>>, right: Box<Node<V>> }
}

impl<V> Node<V> {
    /// Returns the weight (total number of occurrences of the values in the subtree) of `self`.
    #[inline] pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight
        }
    }

    /// Returns whether `self` is a leaf.
    #[inline] pub fn is_leaf(&self) -> bool { matches!(self, Node::Leaf { .. }) }

    /// Returns the value of the leaf, or `None` for an internal node.
    #[inline] pub fn value(&self) -> Option<&V> {
        match self {
            Node::Leaf { value, .. } => Some(value),
            Node::Internal { .. } => None
        }
    }

    /// Returns the child reached by `bit` (`false` for left, `true` for right), or `None` for a leaf.
    #[inline] pub fn child(&self, bit: bool) -> Option<&Node<V>> {
        match self {
            Node::Internal { left, right, .. } => Some(if bit { &**right } else { &**left }),
            Node::Leaf { .. } => None
        }
    }

    /// Constructs internal node with the given children.
    fn merge(left: Self, right: Self) -> Self {
        Node::Internal { weight: left.weight().saturating_add(right.weight()), left: Box::new(left), right: Box::new(right) }
    }

    /// Calls `f` for each leaf in the subtree, from the left to the right.
    /// Arguments of `f` are: value assigned to the leaf, its weight and its depth (counting from `depth` of `self`).
    fn for_each_leaf<F: FnMut(&V, u64, u32)>(&self, depth: u32, f: &mut F) {
        match self {
            Node::Leaf { value, weight } => f(value, *weight, depth),
            Node::Internal { left, right, .. } => {
                left.for_each_leaf(depth + 1, f);
                right.for_each_leaf(depth + 1, f);
            }
        }
    }
}

impl<V: GetSize> GetSize for Node<V> {
    fn size_bytes_dyn(&self) -> usize {
        match self {
            Node::Leaf { value, .. } => value.size_bytes_dyn(),
            Node::Internal { left, right, .. } => left.as_ref().size_bytes() + right.as_ref().size_bytes()
        }
    }
    const USES_DYN_MEM: bool = true;
}

/// Node waiting in the priority queue of the tree builder.
///
/// The queue pops entries with the smallest weight first and,
/// among equal weights, the entry pushed earliest (lowest `order`).
struct QueueEntry<V> {
    weight: u64,
    order: usize,
    node: Node<V>
}

impl<V> QueueEntry<V> {
    #[inline] fn new(node: Node<V>, order: usize) -> Self {
        Self { weight: node.weight(), order, node }
    }
}

impl<V> PartialEq for QueueEntry<V> {
    fn eq(&self, other: &Self) -> bool { self.weight == other.weight && self.order == other.order }
}

impl<V> Eq for QueueEntry<V> {}

impl<V> PartialOrd for QueueEntry<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl<V> Ord for QueueEntry<V> {
    /// Reversed (weight, order) comparison, which turns the max-heap `BinaryHeap` into a min-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.weight, other.order).cmp(&(self.weight, self.order))
    }
}

/// Huffman tree (binary, not canonical), which is both the decoder and the source of the codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<V> {
    root: Node<V>,
    /// Number of leaves.
    len: usize
}

impl<V> Tree<V> {
    /// Constructs the tree for given frequencies of values.
    ///
    /// Each value becomes a leaf. Then the two nodes of the smallest weights are repeatedly
    /// replaced by their parent: the node extracted first becomes its left child, the second one its right child.
    /// Ties between equal weights are broken in the FIFO manner:
    /// leaves in the order the values are exposed by `frequencies`, then merged nodes in the order of their creation.
    ///
    /// Returns [`HuffmanError::EmptyInput`] if `frequencies` contains no values.
    ///
    /// The algorithm runs in *O(n log n)* time, where *n* is the number of values.
    pub fn from_frequencies<F: Frequencies<Value=V>>(frequencies: F) -> Result<Self, HuffmanError> {
        let (values, freq) = frequencies.into_unsorted();
        let len = values.len();
        let mut queue: BinaryHeap<QueueEntry<V>> = values.into_vec().into_iter().zip(freq.iter())
            .enumerate()
            .map(|(order, (value, weight))| QueueEntry::new(Node::Leaf { value, weight: *weight }, order))
            .collect();
        let mut next_order = len;
        loop {
            let first = queue.pop().ok_or(HuffmanError::EmptyInput)?;
            let Some(second) = queue.pop() else {
                return Ok(Self { root: first.node, len });
            };
            queue.push(QueueEntry::new(Node::merge(first.node, second.node), next_order));
            next_order += 1;
        }
    }

    /// Counts occurrences of all values exposed by `iter` and constructs the tree for obtained frequencies.
    pub fn from_iter<Iter>(iter: Iter) -> Result<Self, HuffmanError>
        where Iter: IntoIterator, Iter::Item: Borrow<V>, V: Hash + Eq + Clone
    {
        Self::from_frequencies(FrequencyTable::<V>::with_counted_all(iter))
    }

    /// Returns the root of the tree.
    #[inline] pub fn root(&self) -> &Node<V> { &self.root }

    /// Returns the number of values (leaves) in the tree.
    #[inline] pub fn len(&self) -> usize { self.len }

    /// Returns `false`, since each tree has at least one leaf.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns whether the tree consists of a single leaf.
    #[inline] pub fn is_single_leaf(&self) -> bool { self.root.is_leaf() }

    /// Returns the total weight of the tree, which equals the length of the sequence the tree was built for.
    #[inline] pub fn weight(&self) -> u64 { self.root.weight() }

    /// Calls `f` for each leaf in the tree, from the left to the right.
    /// Arguments of `f` are: value assigned to the leaf, its weight and the length of its codeword.
    pub fn for_each_leaf<F: FnMut(&V, u64, u32)>(&self, mut f: F) {
        // the lone root leaf gets the one-bit codeword
        self.root.for_each_leaf(if self.root.is_leaf() { 1 } else { 0 }, &mut f)
    }

    /// Returns the length of the longest codeword.
    pub fn depth(&self) -> u32 {
        let mut result = 0;
        self.for_each_leaf(|_, _, len| result = result.max(len));
        result
    }

    /// Returns the number of bits needed to encode the sequence the tree was built for,
    /// i.e. sum of leaf weights multiplied by the lengths of their codewords.
    pub fn total_bits(&self) -> u64 {
        let mut result = 0;
        self.for_each_leaf(|_, weight, len| result = weight.saturating_mul(len as u64).saturating_add(result));
        result
    }

    /// Returns iterator over (value, codeword) pairs, exposing leaves from the left to the right.
    #[inline] pub fn codes_iter(&self) -> CodesIterator<'_, V> { CodesIterator::new(self) }

    /// Returns decoder that allows for decoding values bit by bit.
    #[inline] pub fn decoder(&self) -> Decoder<'_, V> { Decoder::new(self) }

    /// Decodes all values from `bits`, which yields `false` for `0` and `true` for `1`.
    ///
    /// Returns [`HuffmanError::MalformedBitstream`] if any bit does not match the tree
    /// and [`HuffmanError::TruncatedBitstream`] if `bits` end inside a codeword.
    pub fn decode_bits<I: IntoIterator<Item = bool>>(&self, bits: I) -> Result<Vec<V>, HuffmanError> where V: Clone {
        self.decode_checked(bits.into_iter().map(Some))
    }

    /// Decodes all values from `bits`, the string of `'0'` and `'1'` characters.
    ///
    /// Returns [`HuffmanError::MalformedBitstream`] if any character is not a binary digit
    /// or does not match the tree, and [`HuffmanError::TruncatedBitstream`] if `bits` end inside a codeword.
    pub fn decode(&self, bits: &str) -> Result<Vec<V>, HuffmanError> where V: Clone {
        self.decode_checked(bits.chars().map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None
        }))
    }

    /// Decodes all values from `bits`, where `None` stands for a character that is not a binary digit.
    fn decode_checked<I: Iterator<Item = Option<bool>>>(&self, bits: I) -> Result<Vec<V>, HuffmanError> where V: Clone {
        let mut result = Vec::new();
        let mut decoder = self.decoder();
        for (position, bit) in bits.enumerate() {
            let bit = bit.ok_or(HuffmanError::MalformedBitstream { position })?;
            match decoder.consume(bit) {
                DecodingResult::Value(v) => result.push(v.clone()),
                DecodingResult::Incomplete => {},
                DecodingResult::Invalid => return Err(HuffmanError::MalformedBitstream { position })
            }
        }
        if decoder.is_at_root() {
            Ok(result)
        } else {
            Err(HuffmanError::TruncatedBitstream { consumed: decoder.consumed_bits() })
        }
    }
}

impl<V: Hash + Eq + Clone> Tree<V> {
    /// Returns a map from values to their codewords.
    pub fn codes(&self) -> CodeTable<V> {
        self.codes_iter().map(|(v, c)| (v.clone(), c)).collect()
    }
}

impl<V: GetSize> GetSize for Tree<V> {
    fn size_bytes_dyn(&self) -> usize { self.root.size_bytes_dyn() }
    const USES_DYN_MEM: bool = true;
}

/// Values encoded by [`encode`] together with everything needed to decode them.
#[derive(Debug, Clone)]
pub struct Encoded<V: Hash + Eq> {
    /// Concatenated codewords of the encoded values, as `'0'` and `'1'` characters.
    pub bits: String,
    /// Codewords of all values.
    pub codes: CodeTable<V>,
    /// The tree needed by [`decode`].
    pub tree: Tree<V>
}

/// Counts occurrences of all values exposed by `iter`.
pub fn count<V, Iter>(iter: Iter) -> FrequencyTable<V>
    where Iter: IntoIterator, Iter::Item: Borrow<V>, V: Hash + Eq + Clone
{
    FrequencyTable::with_counted_all(iter)
}

/// Constructs the tree for given `frequencies`. See [`Tree::from_frequencies`].
#[inline] pub fn build<F: Frequencies>(frequencies: F) -> Result<Tree<F::Value>, HuffmanError> {
    Tree::from_frequencies(frequencies)
}

/// Builds the tree for the values exposed by `iter`, derives their codewords and encodes them.
///
/// Returns [`HuffmanError::EmptyInput`] if `iter` is empty.
pub fn encode<V, Iter>(iter: Iter) -> Result<Encoded<V>, HuffmanError>
    where Iter: IntoIterator + Clone, Iter::Item: Borrow<V>, V: Hash + Eq + Clone
{
    let tree = Tree::<V>::from_iter(iter.clone())?;
    let codes = tree.codes();
    let mut bits = String::with_capacity(tree.total_bits() as usize);
    codes.encode_into(&mut bits, iter)?;
    Ok(Encoded { bits, codes, tree })
}

/// Decodes `bits` (string of `'0'` and `'1'` characters) with `tree`. See [`Tree::decode`].
#[inline] pub fn decode<V: Clone>(bits: &str, tree: &Tree<V>) -> Result<Vec<V>, HuffmanError> {
    tree.decode(bits)
}
