//! Text renderers for a pin layout.
//!
//! Every renderer is a pure function of its input: the same pins and options
//! always produce byte-identical text. Nothing here writes to stdout.

pub mod header;

use std::collections::BTreeSet;
use thiserror::Error;

use crate::config::RenderOptions;
use crate::pin::{NameError, NameMap, PinSet};

pub use header::header_section;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Names(#[from] NameError),
    #[error("chip '{0}' has no MCU symbols to guard its header section")]
    MissingGuards(String),
}

/// One `#define <name> <number>` line per entry, in map order.
pub fn macro_definitions(names: &NameMap) -> String {
    let mut out = String::new();
    for (name, number) in names.iter() {
        out.push_str(&format!("#define {} {}\n", name, number));
    }
    out
}

/// The C array of pin structs, one `_FG_PIN(port, bit)` per pin. The closing
/// line has no trailing newline.
pub fn array_literal(pins: &PinSet, options: &RenderOptions) -> String {
    pin_array(pins, options, false)
}

/// With `null_pin`, the last element is annotated as the sentinel slot.
pub(crate) fn pin_array(pins: &PinSet, options: &RenderOptions, null_pin: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("    const {} {}[] = {{\n", options.struct_type, options.array_name));
    let last = pins.len().checked_sub(1);
    for (number, pin) in pins.iter().enumerate() {
        out.push_str(&format!("        {}({}, {}),", options.pin_macro, pin.port, pin.bit));
        if null_pin && Some(number) == last {
            out.push_str(&format!(" // Null pin ({})", options.sentinel));
        }
        out.push('\n');
    }
    out.push_str("    };");
    out
}

/// HTML reference table of pin numbers and macros. The "Alternative name"
/// column is left empty for hand editing.
pub fn html_table(pins: &PinSet) -> String {
    let mut out = String::new();
    out.push_str("<table>\n");
    out.push_str("<tr><th>Number</th><th>AVR pin macro</th><th>Alternative name</th></tr>\n");
    for (number, pin) in pins.iter().enumerate() {
        out.push_str(&format!("<tr><td>{}</td><td>{}</td><td></td></tr>\n", number, pin.symbolic_name()));
    }
    out.push_str("</table>");
    out
}

/// Editor keyword list: every symbolic name across `sets`, deduplicated and
/// sorted bytewise, followed by the sentinel. Each line is `<name>\t<tag>`.
pub fn keywords<'a, I>(sets: I, options: &RenderOptions) -> Result<String, NameError>
where
    I: IntoIterator<Item = &'a PinSet>,
{
    let mut names = BTreeSet::new();
    for set in sets {
        let map = set.symbolic_names(options.duplicate_policy)?;
        names.extend(map.names().map(str::to_string));
    }

    let mut out = String::new();
    for name in &names {
        out.push_str(&format!("{}\t{}\n", name, options.keyword_tag));
    }
    out.push_str(&format!("{}\t{}\n", options.sentinel, options.keyword_tag));
    tracing::debug!("Rendered {} keywords", names.len() + 1);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::DuplicatePolicy;

    fn pins(text: &str) -> PinSet {
        text.parse().unwrap()
    }

    #[test]
    fn test_macro_definitions() {
        let names = pins("D2 D3").symbolic_names(DuplicatePolicy::Reject).unwrap();
        assert_eq!(macro_definitions(&names), "#define IO_D2 0\n#define IO_D3 1\n");
    }

    #[test]
    fn test_array_literal() {
        let out = array_literal(&pins("B0 B1"), &RenderOptions::default());
        assert_eq!(
            out,
            "    const IOStruct pinStructs[] = {\n        _FG_PIN(B, 0),\n        _FG_PIN(B, 1),\n    };"
        );
    }

    #[test]
    fn test_array_literal_custom_names() {
        let options = RenderOptions {
            array_name: "pins".to_string(),
            struct_type: "Pin".to_string(),
            pin_macro: "PIN".to_string(),
            ..RenderOptions::default()
        };
        let out = array_literal(&pins("F7"), &options);
        assert_eq!(out, "    const Pin pins[] = {\n        PIN(F, 7),\n    };");
    }

    #[test]
    fn test_html_table() {
        let out = html_table(&pins("D2 C6"));
        assert_eq!(
            out,
            "<table>\n\
             <tr><th>Number</th><th>AVR pin macro</th><th>Alternative name</th></tr>\n\
             <tr><td>0</td><td>IO_D2</td><td></td></tr>\n\
             <tr><td>1</td><td>IO_C6</td><td></td></tr>\n\
             </table>"
        );
    }

    #[test]
    fn test_empty_set() {
        let empty = PinSet::default();
        let names = empty.symbolic_names(DuplicatePolicy::Reject).unwrap();
        assert_eq!(macro_definitions(&names), "");
        assert_eq!(keywords([&empty], &RenderOptions::default()).unwrap(), "IO_NONE\tLITERAL1\n");
        assert_eq!(array_literal(&empty, &RenderOptions::default()), "    const IOStruct pinStructs[] = {\n    };");
    }

    #[test]
    fn test_keywords_merge_duplicates() {
        let a = pins("D2");
        let b = pins("D2");
        let out = keywords([&a, &b], &RenderOptions::default()).unwrap();
        assert_eq!(out, "IO_D2\tLITERAL1\nIO_NONE\tLITERAL1\n");
    }

    #[test]
    fn test_keywords_sort_bytewise() {
        let out = keywords([&pins("D2 B10 B2 B1")], &RenderOptions::default()).unwrap();
        assert_eq!(
            out,
            "IO_B1\tLITERAL1\nIO_B10\tLITERAL1\nIO_B2\tLITERAL1\nIO_D2\tLITERAL1\nIO_NONE\tLITERAL1\n"
        );
    }

    #[test]
    fn test_keywords_reject_policy_fails() {
        let options = RenderOptions { duplicate_policy: DuplicatePolicy::Reject, ..RenderOptions::default() };
        assert!(keywords([&pins("D4 D4")], &options).is_err());
    }
}
