//! Rent bill computation from utility meter readings and fixed fees.
use serde::{Deserialize, Serialize};

use crate::Money;

/// Utility readings and fees for one rent bill.
///
/// Readings are raw meter indexes; `new >= old` is expected but not enforced,
/// usage is clamped to zero instead. Missing fields deserialize as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterReading {
    pub electricity_old: i64,
    pub electricity_new: i64,
    pub electricity_unit_price: Money,
    pub water_old: i64,
    pub water_new: i64,
    pub water_unit_price: Money,
    pub room_base_fee: Money,
    pub service_fee: Money,
}

impl MeterReading {
    /// Starts a new bill priced with `tariff` and no readings.
    #[must_use]
    pub fn from_tariff(tariff: &Tariff) -> Self {
        Self {
            electricity_unit_price: tariff.electricity_unit_price,
            water_unit_price: tariff.water_unit_price,
            room_base_fee: tariff.room_base_fee,
            service_fee: tariff.service_fee,
            ..Self::default()
        }
    }

    /// Continues from the previous bill: its new indexes become the old
    /// indexes of this one.
    #[must_use]
    pub fn continuing(self, previous: &MeterReading) -> Self {
        Self {
            electricity_old: previous.electricity_new,
            water_old: previous.water_new,
            ..self
        }
    }

    #[must_use]
    pub fn electricity_used(&self) -> i64 {
        self.electricity_new.saturating_sub(self.electricity_old).max(0)
    }

    #[must_use]
    pub fn water_used(&self) -> i64 {
        self.water_new.saturating_sub(self.water_old).max(0)
    }

    #[must_use]
    pub fn electricity_cost(&self) -> Money {
        self.electricity_unit_price
            .saturating_mul(self.electricity_used())
    }

    #[must_use]
    pub fn water_cost(&self) -> Money {
        self.water_unit_price.saturating_mul(self.water_used())
    }

    #[must_use]
    pub fn total(&self) -> Money {
        compute_rent_bill_total(self)
    }
}

/// Default prices for a new rent bill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tariff {
    pub room_base_fee: Money,
    pub service_fee: Money,
    pub electricity_unit_price: Money,
    pub water_unit_price: Money,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            room_base_fee: Money::new(3_000_000),
            service_fee: Money::new(100_000),
            electricity_unit_price: Money::new(3_500),
            water_unit_price: Money::new(25_000),
        }
    }
}

/// Total amount of a rent bill.
///
/// `room_base_fee + service_fee + electricity_used * electricity_unit_price +
/// water_used * water_unit_price`, with negative usage clamped to 0. Fees and
/// prices are taken as-is, negative ones included.
#[must_use]
pub fn compute_rent_bill_total(meter: &MeterReading) -> Money {
    meter
        .room_base_fee
        .saturating_add(meter.service_fee)
        .saturating_add(meter.electricity_cost())
        .saturating_add(meter.water_cost())
}

/// Description shared by every entry of a rent batch.
#[must_use]
pub fn rent_description(meter: &MeterReading) -> String {
    format!(
        "Rent (electricity: {}, water: {})",
        meter.electricity_used(),
        meter.water_used()
    )
}
