// src/pin/names.rs - Symbolic pin names (IO_D2 etc.) and their pin numbers
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::PinSet;

/// What to do when two pins of one set produce the same symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail with [`NameError::Duplicate`].
    Reject,
    /// Later pin number wins, with a warning.
    #[default]
    WarnAndOverwrite,
    /// Later pin number wins without notice.
    SilentOverwrite,
    /// Earlier pin number wins, with a warning.
    KeepFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("symbolic name `{name}` is assigned to both pin {first} and pin {second}")]
    Duplicate { name: String, first: usize, second: usize },
}

/// Ordered mapping from symbolic name to pin number.
///
/// Iteration follows first insertion. Overwriting an existing name changes
/// its pin number but not its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    entries: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the names of every pin in `pins`, in pin order.
    pub fn build(pins: &PinSet, policy: DuplicatePolicy) -> Result<Self, NameError> {
        let mut map = Self::new();
        for (index, pin) in pins.iter().enumerate() {
            map.insert(pin.symbolic_name(), index, policy)?;
        }
        Ok(map)
    }

    pub fn insert(&mut self, name: String, index: usize, policy: DuplicatePolicy) -> Result<(), NameError> {
        let pos = match self.positions.get(&name).copied() {
            Some(pos) => pos,
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push((name, index));
                return Ok(());
            }
        };

        let first = self.entries[pos].1;
        match policy {
            DuplicatePolicy::Reject => {
                return Err(NameError::Duplicate { name, first, second: index });
            }
            DuplicatePolicy::WarnAndOverwrite => {
                tracing::warn!("Duplicate symbolic name {} (pins {} and {}), using pin {}", name, first, index, index);
                self.entries[pos].1 = index;
            }
            DuplicatePolicy::SilentOverwrite => {
                self.entries[pos].1 = index;
            }
            DuplicatePolicy::KeepFirst => {
                tracing::warn!("Duplicate symbolic name {} (pins {} and {}), keeping pin {}", name, first, index, first);
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, index)| (name.as_str(), *index))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}
