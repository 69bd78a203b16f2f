//! Tools to deal with codes.

use std::fmt;
use std::str::FromStr;

use dyn_size_of::GetSize;

use crate::HuffmanError;

/// `Code` represents a binary codeword, i.e. the path from the root of the tree to a leaf.
///
/// Its bits are stored as `'0'` (left) and `'1'` (right) characters,
/// the first character corresponds to the step taken from the root.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Default)]
pub struct Code {
    bits: String
}

impl Code {
    /// Constructs an empty code.
    #[inline] pub fn new() -> Self { Self::default() }

    /// Appends `bit` (`false` for `0`, `true` for `1`) to the end of `self`.
    #[inline] pub fn push(&mut self, bit: bool) {
        self.bits.push(if bit { '1' } else { '0' })
    }

    /// Returns copy of `self` with `bit` appended.
    #[inline] pub(crate) fn with(&self, bit: bool) -> Self {
        let mut result = Self { bits: String::with_capacity(self.bits.len() + 1) };
        result.bits.push_str(&self.bits);
        result.push(bit);
        result
    }

    /// Gets `index`-th bit (counting from the root side) or `None` if `index` is out of bounds.
    #[inline] pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.as_bytes().get(index).map(|b| *b == b'1')
    }

    /// Returns the length of `self` in bits.
    #[inline] pub fn len(&self) -> usize { self.bits.len() }

    /// Returns whether `self` consists of zero bits.
    #[inline] pub fn is_empty(&self) -> bool { self.bits.is_empty() }

    /// Returns bits of `self` as a string of `'0'` and `'1'` characters.
    #[inline] pub fn as_str(&self) -> &str { &self.bits }

    /// Returns iterator over bits of `self`, starting from the root side.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.bytes().map(|b| b == b'1')
    }

    /// Returns whether `self` is a prefix of `other` (each code is a prefix of itself).
    #[inline] pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

impl AsRef<str> for Code {
    #[inline] fn as_ref(&self) -> &str { &self.bits }
}

impl FromStr for Code {
    type Err = HuffmanError;

    /// Parses a string of `'0'` and `'1'` characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().position(|c| c != '0' && c != '1') {
            Some(position) => Err(HuffmanError::MalformedBitstream { position }),
            None => Ok(Self { bits: s.to_owned() })
        }
    }
}

impl GetSize for Code {
    fn size_bytes_dyn(&self) -> usize { self.bits.capacity() }
    const USES_DYN_MEM: bool = true;
}
