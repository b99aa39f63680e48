//! Fixed platform-fee formula for splitting trip fares with drivers.

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};

/// Flat fee the platform keeps from every completed trip.
pub const PLATFORM_FEE: f64 = 1.65;

/// Share of the post-fee fare paid out to the driver.
pub const DRIVER_SHARE: f64 = 0.80;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareSplit {
    pub platform_fee: f64,
    pub driver_share: f64,
}

impl FareSplit {
    pub const STANDARD: FareSplit = FareSplit {
        platform_fee: PLATFORM_FEE,
        driver_share: DRIVER_SHARE,
    };

    /// Driver payout for a set of trip costs.
    ///
    /// Formula: `sum(cost - platform_fee) * driver_share`
    pub fn driver_payout(&self, costs: impl IntoIterator<Item = f64>) -> f64 {
        let after_fees: f64 = costs.into_iter().map(|cost| cost - self.platform_fee).sum();
        after_fees * self.driver_share
    }

    pub fn validate(&self) -> Result<()> {
        if !self.platform_fee.is_finite() || self.platform_fee < 0.0 {
            return Err(DispatchError::invalid(format!(
                "platform fee must be non-negative, got {}",
                self.platform_fee
            )));
        }
        if !(0.0..=1.0).contains(&self.driver_share) {
            return Err(DispatchError::invalid(format!(
                "driver share must be within 0.0..=1.0, got {}",
                self.driver_share
            )));
        }
        Ok(())
    }
}

impl Default for FareSplit {
    fn default() -> Self {
        Self::STANDARD
    }
}
