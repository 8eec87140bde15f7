use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code used to format money values.
///
/// The household tracker works in Vietnamese dong, which has no minor units:
/// every amount is already an integer number of dong.
///
/// ## Minor units
///
/// `minor_units()` returns how many decimal digits are used when converting
/// between major units (human output, e.g. `10.50 EUR`) and the stored
/// integers (e.g. `1050`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Vnd,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Vnd => "VND",
            Currency::Eur => "EUR",
        }
    }

    /// Number of fraction digits used when formatting amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Vnd => 0,
            Currency::Eur => 2,
        }
    }

    /// Symbol appended after the formatted amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Vnd => "đ",
            Currency::Eur => "€",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "VND" => Ok(Currency::Vnd),
            "EUR" => Ok(Currency::Eur),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}
