use crate::{DecodingResult, Node, Tree};

/// Decoder that decodes values by walking the tree, consuming one bit at a time.
///
/// It is either at the root of the tree (the initial state, ready to start a codeword)
/// or inside the tree, in the middle of a codeword.
/// Reaching a leaf yields its value and moves the decoder back to the root.
///
/// Time complexity of decoding the whole code is *O(length of the code)*.
///
/// Memory complexity: *O(1)*
pub struct Decoder<'tree, V> {
    /// Root of the tree.
    root: &'tree Node<V>,
    /// Node reached by the bits consumed so far.
    cursor: &'tree Node<V>,
    /// Number of bits of the current, unfinished codeword.
    consumed: u32
}

impl<'tree, V> Decoder<'tree, V> {
    /// Constructs decoder for given `tree`.
    pub fn new(tree: &'tree Tree<V>) -> Self {
        let root = tree.root();
        Self { root, cursor: root, consumed: 0 }
    }

    /// Resets `self` to initial state and makes it ready to decode next value.
    #[inline] pub fn reset(&mut self) {
        self.cursor = self.root;
        self.consumed = 0;
    }

    /// Returns the number of bits of the current codeword consumed since construction,
    /// last reset or last decoded value.
    /// Zero means that `self` is at the root of the tree.
    #[inline(always)] pub fn consumed_bits(&self) -> u32 { self.consumed }

    /// Returns whether `self` is at the root of the tree, i.e. between codewords.
    #[inline(always)] pub fn is_at_root(&self) -> bool { self.consumed == 0 }

    /// Consumes a `bit` (`false` for `0`, `true` for `1`) of the codeword and returns:
    /// - a value if the given `bit` finishes the codeword (`self` gets back to the root);
    /// - [`DecodingResult::Incomplete`] if the codeword is incomplete and the next bit is needed;
    /// - [`DecodingResult::Invalid`] if the tree has no node for `bit`,
    ///     which is possible only for `bit` = `1` and the tree that consists of a single leaf.
    pub fn consume(&mut self, bit: bool) -> DecodingResult<&'tree V> {
        let cursor = self.cursor;
        let next = match cursor {
            Node::Internal { left, right, .. } => if bit { right } else { left },
            Node::Leaf { value, .. } => {   // only the root can be a leaf here; its code is `0`
                return if bit { DecodingResult::Invalid } else { DecodingResult::Value(value) };
            }
        };
        match &**next {
            Node::Leaf { value, .. } => {
                self.reset();
                DecodingResult::Value(value)
            }
            internal => {
                self.cursor = internal;
                self.consumed += 1;
                DecodingResult::Incomplete
            }
        }
    }

    /// Tries to decode and return a single value from the `bits` iterator,
    /// consuming as many bits as needed.
    ///
    /// Returns [`DecodingResult::Incomplete`] if the iterator exhausted before the value was decoded
    /// ([`Self::consumed_bits`] enables checking if the iterator yielded any bit of the codeword before exhausting).
    /// Returns [`DecodingResult::Invalid`] if obtained bit has no node in the tree.
    pub fn decode_next<I: Iterator<Item = bool>>(&mut self, bits: &mut I) -> DecodingResult<&'tree V> {
        for bit in bits {
            match self.consume(bit) {
                DecodingResult::Incomplete => {},
                result => return result
            }
        }
        DecodingResult::Incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abracadabra() -> Tree<char> {
        // a=0, c=100, d=101, b=110, r=111
        Tree::from_iter("abracadabra".chars()).unwrap()
    }

    #[test]
    fn consume_bit_by_bit() {
        let tree = abracadabra();
        let mut decoder = tree.decoder();
        assert!(decoder.is_at_root());
        assert_eq!(decoder.consume(false), DecodingResult::Value(&'a'));
        assert_eq!(decoder.consume(true), DecodingResult::Incomplete);
        assert_eq!(decoder.consumed_bits(), 1);
        assert_eq!(decoder.consume(false), DecodingResult::Incomplete);
        assert_eq!(decoder.consumed_bits(), 2);
        assert_eq!(decoder.consume(true), DecodingResult::Value(&'d'));
        assert!(decoder.is_at_root());
        assert_eq!(decoder.consume(true), DecodingResult::Incomplete);
        assert_eq!(decoder.consume(true), DecodingResult::Incomplete);
        assert_eq!(decoder.consume(true), DecodingResult::Value(&'r'));
    }

    #[test]
    fn reset_in_the_middle() {
        let tree = abracadabra();
        let mut decoder = tree.decoder();
        assert_eq!(decoder.consume(true), DecodingResult::Incomplete);
        assert_eq!(decoder.consume(true), DecodingResult::Incomplete);
        decoder.reset();
        assert_eq!(decoder.consumed_bits(), 0);
        assert_eq!(decoder.consume(false), DecodingResult::Value(&'a'));
    }

    #[test]
    fn single_leaf() {
        let tree = Tree::<char>::from_iter("aaaa".chars()).unwrap();
        let mut decoder = tree.decoder();
        assert_eq!(decoder.consume(false), DecodingResult::Value(&'a'));
        assert!(decoder.is_at_root());
        assert_eq!(decoder.consume(false), DecodingResult::Value(&'a'));
        assert_eq!(decoder.consume(true), DecodingResult::Invalid);
    }

    #[test]
    fn decode_next_from_iterator() {
        let tree = abracadabra();
        let mut decoder = tree.decoder();
        let mut bits = [false, true, true, false, true].into_iter();
        assert_eq!(decoder.decode_next(&mut bits), DecodingResult::Value(&'a'));
        assert_eq!(decoder.decode_next(&mut bits), DecodingResult::Value(&'b'));
        assert_eq!(decoder.decode_next(&mut bits), DecodingResult::Incomplete);
        assert_eq!(decoder.consumed_bits(), 1);
        assert_eq!(decoder.decode_next(&mut [false, false].into_iter()), DecodingResult::Value(&'c'));
    }
}
