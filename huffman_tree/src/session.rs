use std::borrow::Borrow;
use std::hash::Hash;

use crate::{HuffmanError, Tree};

/// Keeps the tree built by the most recent successful [`Session::encode`],
/// so that the bits obtained can be decoded later.
///
/// A failed encoding leaves the previously kept tree untouched.
#[derive(Debug, Clone)]
pub struct Session<V> {
    tree: Option<Tree<V>>
}

impl<V> Default for Session<V> {
    fn default() -> Self { Self { tree: None } }
}

impl<V> Session<V> {
    /// Constructs a session without any tree.
    #[inline] pub fn new() -> Self { Self::default() }

    /// Returns the kept tree, if any.
    #[inline] pub fn tree(&self) -> Option<&Tree<V>> { self.tree.as_ref() }

    /// Drops the kept tree.
    #[inline] pub fn clear(&mut self) { self.tree = None; }

    /// Decodes `bits` with the kept tree.
    ///
    /// Returns [`HuffmanError::MissingTree`] if nothing has been encoded yet.
    pub fn decode(&self, bits: &str) -> Result<Vec<V>, HuffmanError> where V: Clone {
        self.tree.as_ref().ok_or(HuffmanError::MissingTree)?.decode(bits)
    }
}

impl<V: Hash + Eq + Clone> Session<V> {
    /// Encodes the values exposed by `iter` with a tree built for them,
    /// keeps that tree (replacing the previous one) and returns the bits.
    pub fn encode<Iter>(&mut self, iter: Iter) -> Result<String, HuffmanError>
        where Iter: IntoIterator + Clone, Iter::Item: Borrow<V>
    {
        let encoded = crate::encode::<V, _>(iter)?;
        self.tree = Some(encoded.tree);
        Ok(encoded.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_without_tree() {
        let session = Session::<char>::new();
        assert!(session.tree().is_none());
        assert_eq!(session.decode("0101"), Err(HuffmanError::MissingTree));
    }

    #[test]
    fn encode_then_decode() {
        let mut session = Session::<char>::new();
        let bits = session.encode("hello world".chars()).unwrap();
        assert_eq!(session.decode(&bits).unwrap().into_iter().collect::<String>(), "hello world");
        assert_eq!(session.tree().map(|t| t.weight()), Some(11));
    }

    #[test]
    fn failed_encode_keeps_tree() {
        let mut session = Session::<char>::new();
        let bits = session.encode("ab".chars()).unwrap();
        assert_eq!(bits, "01");
        assert_eq!(session.encode("".chars()), Err(HuffmanError::EmptyInput));
        assert_eq!(session.decode("10"), Ok(vec!['b', 'a']));
        session.clear();
        assert_eq!(session.decode("10"), Err(HuffmanError::MissingTree));
    }

    #[test]
    fn encode_replaces_tree() {
        let mut session = Session::<u8>::new();
        session.encode(b"xy".iter()).unwrap();
        let bits = session.encode(b"zzz".iter()).unwrap();
        assert_eq!(bits, "000");
        assert_eq!(session.decode("0"), Ok(vec![b'z']));
    }
}
