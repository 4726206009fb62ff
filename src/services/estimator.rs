//! Move cost estimator.
//!
//! Pure arithmetic over `Decimal`, no store access. The same function backs
//! the `/estimate` endpoint and ad-hoc pricing during quote intake.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub const BASE_RATE: Decimal = dec!(120);
pub const PER_MILE: Decimal = dec!(2.50);
pub const PACKING_RATE: Decimal = dec!(50);

/// Home size tier: 1 = studio, 2 = one bedroom, 3 = two bedrooms,
/// 4 = three or more. The tier doubles as the size multiplier.
pub const MIN_HOME_SIZE: u32 = 1;
pub const MAX_HOME_SIZE: u32 = 4;

#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub distance: Decimal,
    #[serde(rename = "homeSize")]
    pub home_size: u32,
    #[serde(rename = "accessMultiplier", default = "default_access")]
    pub access_multiplier: Decimal,
    #[serde(default)]
    pub packing: bool,
}

fn default_access() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Estimate {
    pub total: Decimal,
    #[serde(rename = "packingFee")]
    pub packing_fee: Decimal,
}

pub fn estimate(request: &EstimateRequest) -> Result<Estimate, ServiceError> {
    if request.distance.is_sign_negative() {
        return Err(ServiceError::ValidationError(
            "distance must not be negative".into(),
        ));
    }
    if !(MIN_HOME_SIZE..=MAX_HOME_SIZE).contains(&request.home_size) {
        return Err(ServiceError::ValidationError(format!(
            "home size must be between {} and {}",
            MIN_HOME_SIZE, MAX_HOME_SIZE
        )));
    }
    if request.access_multiplier < Decimal::ONE {
        return Err(ServiceError::ValidationError(
            "access multiplier must be at least 1.0".into(),
        ));
    }

    let size_multiplier = Decimal::from(request.home_size);
    let packing_fee = if request.packing {
        PACKING_RATE * size_multiplier
    } else {
        Decimal::ZERO
    };
    let total = (BASE_RATE + request.distance * PER_MILE) * size_multiplier
        * request.access_multiplier
        + packing_fee;

    Ok(Estimate { total, packing_fee })
}
