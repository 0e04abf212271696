//! # Pin layouts
//!
//! A chip's pin layout is an ordered list of (port, bit) pairs. The position of
//! a pin in that list is its pin number, the index FastGPIO code uses to
//! address it.
//!
//! ```rust
//! use pinmap_gen::pin::{DuplicatePolicy, PinSet};
//!
//! let pins: PinSet = "D2\nD3\n".parse().unwrap();
//! let names = pins.symbolic_names(DuplicatePolicy::Reject).unwrap();
//! assert_eq!(names.get("IO_D3"), Some(1));
//! ```

pub mod names;
pub mod parser;

use std::fmt;
use std::str::FromStr;

pub use names::{DuplicatePolicy, NameError, NameMap};
pub use parser::{PinParseError, PinSpan, TokenFault, parse_pin_list};

/// One physical pin: a port letter and a bit within that port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinDescriptor {
    pub port: char,
    pub bit: u8,
}

impl PinDescriptor {
    pub fn new(port: char, bit: u8) -> Self {
        Self { port, bit }
    }

    /// `IO_<port><bit>`, e.g. `IO_D2`.
    pub fn symbolic_name(&self) -> String {
        format!("IO_{}{}", self.port, self.bit)
    }
}

/// Formats as the token the pin was parsed from.
impl fmt::Display for PinDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.port, self.bit)
    }
}

/// Ordered pins of one chip variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinSet {
    pins: Vec<PinDescriptor>,
}

impl PinSet {
    pub fn new(pins: Vec<PinDescriptor>) -> Self {
        Self { pins }
    }

    pub fn parse(text: &str) -> Result<Self, PinParseError> {
        parse_pin_list(text).map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn get(&self, number: usize) -> Option<&PinDescriptor> {
        self.pins.get(number)
    }

    pub fn last(&self) -> Option<&PinDescriptor> {
        self.pins.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PinDescriptor> {
        self.pins.iter()
    }

    pub fn as_slice(&self) -> &[PinDescriptor] {
        &self.pins
    }

    /// Tokens in pin order, e.g. `["D2", "D3"]`.
    pub fn tokens(&self) -> Vec<String> {
        self.pins.iter().map(ToString::to_string).collect()
    }

    pub fn symbolic_names(&self, policy: DuplicatePolicy) -> Result<NameMap, NameError> {
        NameMap::build(self, policy)
    }
}

impl FromStr for PinSet {
    type Err = PinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a PinSet {
    type Item = &'a PinDescriptor;
    type IntoIter = std::slice::Iter<'a, PinDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.pins.iter()
    }
}

impl FromIterator<PinDescriptor> for PinSet {
    fn from_iter<I: IntoIterator<Item = PinDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbolic_name() {
        assert_eq!(PinDescriptor::new('D', 2).symbolic_name(), "IO_D2");
        assert_eq!(PinDescriptor::new('B', 10).symbolic_name(), "IO_B10");
    }

    #[test]
    fn test_tokens_round_trip() {
        let text = "D2\nD3\nD1\nC6\nB10\n";
        let pins = PinSet::parse(text).unwrap();
        let expected: Vec<String> = text.split_whitespace().map(String::from).collect();
        assert_eq!(pins.tokens(), expected);
    }

    #[test]
    fn test_collect_into_pin_set() {
        let pins: PinSet = [PinDescriptor::new('B', 0), PinDescriptor::new('B', 1)].into_iter().collect();
        assert_eq!(pins.len(), 2);
        assert_eq!(pins.get(1), Some(&PinDescriptor::new('B', 1)));
        assert_eq!(pins.last(), Some(&PinDescriptor::new('B', 1)));
    }
}
