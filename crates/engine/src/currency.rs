use crate::EngineError;

/// ISO-like currency code used by money values.
///
/// The app is effectively mono-currency (default `CRC`, Costa Rican colón),
/// but currency is modelled explicitly to keep the data model future-proof.
///
/// ## Minor units
///
/// Monetary values are stored as an `i64` number of **minor units** (see
/// `Money`). `minor_units()` returns how many decimal digits are used when
/// converting between:
/// - major units (human input/output, e.g. `₡10,50`)
/// - minor units (stored integers, e.g. `1050`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    Crc,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Crc => "CRC",
        }
    }

    /// Symbol used on display surfaces.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Crc => "₡",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    ///
    /// Example: CRC uses 2 fraction digits (céntimos).
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Crc => 2,
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
            "CRC" => Ok(Currency::Crc),
            other => Err(EngineError::InvalidAmount(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}
