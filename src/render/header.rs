// src/render/header.rs - Chip-selection section of FastGPIO.h
//
// Produces the `#if defined(...)` / `#elif` chain with one pin array and one
// block of pin macros per chip, ending in an `#error` for unknown boards.

use super::{RenderError, macro_definitions, pin_array};
use crate::config::RenderOptions;
use crate::pin::{NameMap, PinSet};
use crate::registry::Chip;

/// Render the header section for `chips`, in the given order.
pub fn header_section(chips: &[&Chip], options: &RenderOptions) -> Result<String, RenderError> {
    let mut out = String::new();
    for (i, chip) in chips.iter().enumerate() {
        if chip.mcu.is_empty() {
            return Err(RenderError::MissingGuards(chip.name.clone()));
        }
        let guard = chip
            .mcu
            .iter()
            .map(|symbol| format!("defined({})", symbol))
            .collect::<Vec<_>>()
            .join(" || ");
        if i == 0 {
            out.push_str(&format!("#if {}\n", guard));
        } else {
            out.push_str(&format!("\n#elif {}\n", guard));
        }
        out.push('\n');
        out.push_str(&pin_array(&chip.pins, options, chip.null_pin));
        out.push_str("\n\n");
        out.push_str(&chip_macros(chip, options)?);
        tracing::debug!("Rendered header section for {}", chip.name);
    }

    if !chips.is_empty() {
        out.push_str("\n#else\n");
    }
    out.push_str(&format!("#error {}\n", options.unsupported_message));
    if !chips.is_empty() {
        out.push_str("#endif\n");
    }
    Ok(out)
}

/// Pin macros for one chip. A null pin is defined as the sentinel instead of
/// under its own name.
fn chip_macros(chip: &Chip, options: &RenderOptions) -> Result<String, RenderError> {
    let null_number = match chip.pins.len().checked_sub(1) {
        Some(last) if chip.null_pin => Some(last),
        _ => None,
    };
    let named: PinSet = match null_number {
        Some(last) => chip.pins.iter().take(last).copied().collect(),
        None => chip.pins.clone(),
    };

    let names = NameMap::build(&named, options.duplicate_policy)?;
    let mut out = macro_definitions(&names);
    if let Some(number) = null_number {
        out.push_str(&format!("#define {} {}\n", options.sentinel, number));
    }
    Ok(out)
}
