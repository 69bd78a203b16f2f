use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;

use dyn_size_of::GetSize;

use crate::{Code, HuffmanError, Node, Tree};

/// Iterator over value-codeword pairs of the tree, exposing leaves from the left to the right.
///
/// The value of the tree that consists of a single leaf gets the one-bit code `0`.
pub struct CodesIterator<'tree, V> {
    /// Nodes still to visit, together with the codes of the paths leading to them.
    stack: Vec<(&'tree Node<V>, Code)>,
    /// Number of leaves not exposed yet.
    remaining: usize
}

impl<'tree, V> CodesIterator<'tree, V> {
    /// Returns iterator over codes assigned to the leaves of `tree`.
    pub fn new(tree: &'tree Tree<V>) -> Self {
        let root = tree.root();
        let root_code = if root.is_leaf() { Code::new().with(false) } else { Code::new() };
        Self { stack: vec![(root, root_code)], remaining: tree.len() }
    }
}

impl<'tree, V> Iterator for CodesIterator<'tree, V> {
    type Item = (&'tree V, Code);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, code) = self.stack.pop()?;
            match node {
                Node::Leaf { value, .. } => {
                    self.remaining -= 1;
                    return Some((value, code));
                }
                Node::Internal { left, right, .. } => {
                    self.stack.push((&**right, code.with(true)));
                    self.stack.push((&**left, code.with(false)));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'tree, V> ExactSizeIterator for CodesIterator<'tree, V> {}

impl<'tree, V> FusedIterator for CodesIterator<'tree, V> {}

/// Map from values to their codewords, used for encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable<V: Hash + Eq> {
    codes: HashMap<V, Code>
}

impl<V: Hash + Eq> CodeTable<V> {
    /// Returns the codeword of `value` or `None` if the table does not contain `value`.
    #[inline] pub fn get<Q>(&self, value: &Q) -> Option<&Code> where V: Borrow<Q>, Q: Hash + Eq + ?Sized {
        self.codes.get(value)
    }

    /// Returns the number of values in the table.
    #[inline] pub fn len(&self) -> usize { self.codes.len() }

    /// Returns whether the table is empty.
    #[inline] pub fn is_empty(&self) -> bool { self.codes.is_empty() }

    /// Returns iterator over (value, codeword) pairs, in arbitrary order.
    #[inline] pub fn iter(&self) -> impl Iterator<Item = (&V, &Code)> + '_ { self.codes.iter() }

    /// Returns the underlying map.
    #[inline] pub fn as_map(&self) -> &HashMap<V, Code> { &self.codes }

    /// Returns a map from values to the lengths of their codes.
    pub fn code_lengths(&self) -> HashMap<V, u32> where V: Clone {
        self.codes.iter().map(|(v, c)| (v.clone(), c.len() as u32)).collect()
    }

    /// Appends to `output` the codewords of all values exposed by `iter`.
    ///
    /// Returns [`HuffmanError::UnknownSymbol`] (with the index of the offending item)
    /// if the table lacks any of the values. In such a case, `output` contains
    /// the codewords of the values that precede the offending one.
    pub fn encode_into<Iter>(&self, output: &mut String, iter: Iter) -> Result<(), HuffmanError>
        where Iter: IntoIterator, Iter::Item: Borrow<V>
    {
        for (position, value) in iter.into_iter().enumerate() {
            let code = self.codes.get(value.borrow()).ok_or(HuffmanError::UnknownSymbol { position })?;
            output.push_str(code.as_str());
        }
        Ok(())
    }

    /// Returns the concatenation of codewords of all values exposed by `iter`.
    ///
    /// Returns [`HuffmanError::UnknownSymbol`] if the table lacks any of the values.
    pub fn encode<Iter>(&self, iter: Iter) -> Result<String, HuffmanError>
        where Iter: IntoIterator, Iter::Item: Borrow<V>
    {
        let mut result = String::new();
        self.encode_into(&mut result, iter)?;
        Ok(result)
    }
}

impl<V: Hash + Eq> FromIterator<(V, Code)> for CodeTable<V> {
    fn from_iter<Iter: IntoIterator<Item = (V, Code)>>(iter: Iter) -> Self {
        Self { codes: iter.into_iter().collect() }
    }
}

impl<V: Hash + Eq> From<CodeTable<V>> for HashMap<V, Code> {
    #[inline] fn from(table: CodeTable<V>) -> Self { table.codes }
}

impl<V: Hash + Eq + GetSize> GetSize for CodeTable<V> {
    fn size_bytes_dyn(&self) -> usize {
        self.codes.capacity() * std::mem::size_of::<(V, Code)>() +
            self.codes.iter().map(|(v, c)| v.size_bytes_dyn() + c.size_bytes_dyn()).sum::<usize>()
    }
    const USES_DYN_MEM: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn code(bits: &str) -> Code { bits.parse().unwrap() }

    #[test]
    fn codes_in_leaf_order() {
        let tree = Tree::<char>::from_iter("abracadabra".chars()).unwrap();
        let codes: Vec<_> = tree.codes_iter().map(|(v, c)| (*v, c.to_string())).collect();
        assert_eq!(codes, [('a', "0".to_owned()), ('c', "100".to_owned()), ('d', "101".to_owned()),
                           ('b', "110".to_owned()), ('r', "111".to_owned())]);
        assert_eq!(tree.codes_iter().len(), 5);
    }

    #[test]
    fn single_leaf_code() {
        let tree = Tree::<char>::from_iter("zzz".chars()).unwrap();
        let mut iter = tree.codes_iter();
        assert_eq!(iter.next(), Some((&'z', code("0"))));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn encode_with_table() {
        let table: CodeTable<char> = [('a', code("0")), ('b', code("10")), ('c', code("11"))].into_iter().collect();
        assert_eq!(table.len(), 3);
        assert_eq!(table.encode("abcab".chars()), Ok("01011010".to_owned()));
        assert_eq!(table.encode("".chars()), Ok(String::new()));
        assert_eq!(table.code_lengths(), hashmap!('a' => 1, 'b' => 2, 'c' => 2));
    }

    #[test]
    fn encode_unknown_symbol() {
        let table: CodeTable<char> = [('a', code("0")), ('b', code("1"))].into_iter().collect();
        assert_eq!(table.encode("abca".chars()), Err(HuffmanError::UnknownSymbol { position: 2 }));
        let mut output = String::from("1");
        assert_eq!(table.encode_into(&mut output, "bad".chars()), Err(HuffmanError::UnknownSymbol { position: 2 }));
        assert_eq!(output, "110");
    }
}
