//! Named chip layouts.
//!
//! The registry starts out with the layouts FastGPIO ships (`leonardo` for the
//! ATmega32U4 and `uno` for the ATmega168/328 family) and can be extended or
//! overridden from the configuration file. It is built once at startup and
//! only read afterwards.

use thiserror::Error;

use crate::config::{ChipConfig, Config};
use crate::pin::{PinParseError, PinSet};

/// Arduino Leonardo / ATmega32U4. The last pin (E0) is the null pin.
pub const LEONARDO_PINS: &str = "
D2
D3
D1
D0
D4
C6
D7
E6
B4
B5
B6
B7
D6
C7
B3
B1
B2
B0
F7
F6
F5
F4
F1
F0
D4
D7
B4
B5
B6
D6
D5
E2
E0
";

/// Arduino Uno / ATmega168 and ATmega328. The last pin (C7) is the null pin.
pub const UNO_PINS: &str = "
D0
D1
D2
D3
D4
D5
D6
D7
B0
B1
B2
B3
B4
B5
C0
C1
C2
C3
C4
C5
C6
C7
";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown chip '{name}' (available: {available})")]
    UnknownChip { name: String, available: String },
    #[error("chip '{0}' is defined more than once in the configuration")]
    DuplicateChip(String),
    #[error("pin list of chip '{chip}' is invalid: {source}")]
    Parse {
        chip: String,
        #[source]
        source: PinParseError,
    },
}

/// A chip variant and its pin layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub name: String,
    /// Preprocessor symbols selecting this chip, e.g. `__AVR_ATmega32U4__`.
    pub mcu: Vec<String>,
    /// Whether the final pin is the `IO_NONE` slot.
    pub null_pin: bool,
    pub pins: PinSet,
}

impl Chip {
    pub fn parse(name: &str, mcu: &[&str], null_pin: bool, pins: &str) -> Result<Self, RegistryError> {
        let pins = PinSet::parse(pins).map_err(|source| RegistryError::Parse {
            chip: name.to_string(),
            source,
        })?;
        tracing::debug!("Parsed chip {} with {} pins", name, pins.len());
        Ok(Self {
            name: name.to_string(),
            mcu: mcu.iter().map(|m| m.to_string()).collect(),
            null_pin,
            pins,
        })
    }

    pub fn from_config(config: &ChipConfig) -> Result<Self, RegistryError> {
        let mcu: Vec<&str> = config.mcu.iter().map(String::as_str).collect();
        Self::parse(&config.name, &mcu, config.null_pin, &config.pins)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    chips: Vec<Chip>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chips FastGPIO supports out of the box: `leonardo`, then `uno`.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(Chip::parse("leonardo", &["__AVR_ATmega32U4__"], true, LEONARDO_PINS)?);
        registry.register(Chip::parse(
            "uno",
            &["__AVR_ATmega168__", "__AVR_ATmega168P__", "__AVR_ATmega328__", "__AVR_ATmega328P__"],
            true,
            UNO_PINS,
        )?);
        Ok(registry)
    }

    /// Built-in chips plus (or replaced by) the chips in `config`.
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        let mut registry = Self::builtin()?;
        let mut seen: Vec<&str> = Vec::new();
        for chip_config in &config.chips {
            if seen.contains(&chip_config.name.as_str()) {
                return Err(RegistryError::DuplicateChip(chip_config.name.clone()));
            }
            seen.push(&chip_config.name);
            registry.register(Chip::from_config(chip_config)?);
        }
        Ok(registry)
    }

    /// Add a chip, replacing any chip of the same name in place.
    pub fn register(&mut self, chip: Chip) {
        match self.chips.iter_mut().find(|c| c.name == chip.name) {
            Some(existing) => {
                tracing::info!("Replacing chip {}", chip.name);
                *existing = chip;
            }
            None => self.chips.push(chip),
        }
    }

    pub fn get(&self, name: &str) -> Result<&Chip, RegistryError> {
        self.chips.iter().find(|c| c.name == name).ok_or_else(|| RegistryError::UnknownChip {
            name: name.to_string(),
            available: self.names().collect::<Vec<_>>().join(", "),
        })
    }

    /// Look up `names` in order; an empty list selects every chip.
    pub fn select(&self, names: &[String]) -> Result<Vec<&Chip>, RegistryError> {
        if names.is_empty() {
            return Ok(self.chips.iter().collect());
        }
        names.iter().map(|name| self.get(name)).collect()
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chips.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }
}
