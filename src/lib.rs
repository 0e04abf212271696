//! pinmap-gen: code generator for the FastGPIO pin tables.
//!
//! Turns a chip's ordered list of port/bit pins into `IO_xx` pin-number macros,
//! the C pin struct array, an HTML pin table and the editor keyword list.

pub mod cli;
pub mod config;
pub mod pin;
pub mod registry;
pub mod render;

pub use config::{Config, ConfigError, RenderOptions};
pub use pin::{DuplicatePolicy, PinDescriptor, PinSet};
pub use registry::{Chip, Registry};
