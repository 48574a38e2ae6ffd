//! Read-only views the shell renders: the machine status snapshot and the
//! purchase receipt.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    catalog::Drink,
    machine::SalesTally,
    money::MoneyCents,
    resources::ResourceKind,
};

/// One resource level next to its capacity maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceGauge {
    pub level: u32,
    pub capacity: u32,
}

/// Structured view over the whole machine state. Building one never mutates
/// anything; two snapshots taken without operations in between are equal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub water: ResourceGauge,
    pub milk: ResourceGauge,
    pub beans: ResourceGauge,
    pub cups: ResourceGauge,
    pub till: MoneyCents,
    pub wallet: MoneyCents,
    pub sold: SalesTally,
    /// Historical revenue, recomputed from counters and catalog prices.
    pub revenue: MoneyCents,
    pub withdrawn_total: MoneyCents,
    pub donated: MoneyCents,
}

impl StatusReport {
    /// Gauges in the fixed water/milk/beans/cups order, for rendering.
    #[must_use]
    pub fn gauges(&self) -> [(ResourceKind, ResourceGauge); 4] {
        [
            (ResourceKind::Water, self.water),
            (ResourceKind::Milk, self.milk),
            (ResourceKind::Beans, self.beans),
            (ResourceKind::Cups, self.cups),
        ]
    }
}

/// Proof of purchase for one brew, issued by both payment paths.
///
/// `change` is informational only: the cash path hands it straight back to
/// the customer and it never enters the till; the wallet path always sets it
/// to zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub drink: Drink,
    pub price: MoneyCents,
    pub paid: MoneyCents,
    pub change: MoneyCents,
    pub issued_at: DateTime<Utc>,
}
