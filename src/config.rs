//! Folding options.

use crate::{error::FoldError, params::Dg};

/// Largest accepted scale. At this resolution the 1600 kcal/mol isolated pair
/// penalty is 1.6e9 units, so sums over billions of pairs still fit an `i64`.
pub const MAX_SCALE: Dg = 1_000_000;

/// Temperature and fixed-point scale for a fold.
///
/// Energies are held as integers in units of `1 / scale` kcal/mol, so the
/// default scale of 100 folds with 0.01 kcal/mol resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldOptions {
    /// Celsius
    pub temp: f64,
    pub scale: Dg,
}

impl Default for FoldOptions {
    fn default() -> Self {
        Self {
            temp: 37.0,
            scale: 100,
        }
    }
}

impl FoldOptions {
    pub fn with_temp(mut self, temp: f64) -> Self {
        self.temp = temp;
        self
    }

    pub fn with_scale(mut self, scale: Dg) -> Self {
        self.scale = scale;
        self
    }

    /// Options at `temp` °C, or the default temperature.
    pub fn at(temp: Option<f64>) -> Self {
        let options = Self::default();
        match temp {
            Some(temp) => options.with_temp(temp),
            None => options,
        }
    }

    /// The scale must lie in `1..=MAX_SCALE`.
    pub(crate) fn validate(&self) -> Result<(), FoldError> {
        if !(1..=MAX_SCALE).contains(&self.scale) {
            return Err(FoldError::InvalidScale(self.scale));
        }
        Ok(())
    }
}
