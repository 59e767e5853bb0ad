//! Transfer amounts scaled to the chain's smallest unit.

use num_bigint::BigUint;

/// Fractional digits of one coin; amounts are scaled by `10^AMOUNT_DECIMALS`.
pub const AMOUNT_DECIMALS: usize = 18;

/// A positive transfer amount expressed in the smallest chain unit.
///
/// Build one with [`crate::parse_amount`]; scaling is exact, with no float rounding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount {
    units: BigUint,
}

impl Amount {
    pub(crate) const fn from_units(units: BigUint) -> Self {
        Self { units }
    }

    /// Amount in the smallest unit.
    #[must_use]
    pub const fn units(&self) -> &BigUint {
        &self.units
    }

    /// Smallest-unit amount as a base-10 string, as handed to the chain client.
    #[must_use]
    pub fn to_units_string(&self) -> String {
        self.units.to_string()
    }
}
