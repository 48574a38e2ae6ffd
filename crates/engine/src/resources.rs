//! Consumable resources: kinds, capacity limits, current levels, and the
//! clamp-fill refill rule.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Recipe;

/// The four consumables the machine tracks.
///
/// `ALL` fixes the order used everywhere: availability checks, missing-resource
/// lists, refill reports, and the status view all walk the resources in
/// water, milk, beans, cups order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Water,
    Milk,
    Beans,
    Cups,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Water,
        ResourceKind::Milk,
        ResourceKind::Beans,
        ResourceKind::Cups,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ResourceKind::Water => "water",
            ResourceKind::Milk => "milk",
            ResourceKind::Beans => "beans",
            ResourceKind::Cups => "cups",
        }
    }

    /// Unit suffix for rendering ("ml", "g", "u").
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            ResourceKind::Water | ResourceKind::Milk => "ml",
            ResourceKind::Beans => "g",
            ResourceKind::Cups => "u",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maximum holding quantity per resource. Immutable once the machine is
/// built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub water_ml: u32,
    pub milk_ml: u32,
    pub beans_g: u32,
    pub cups: u32,
}

impl Capacity {
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Water => self.water_ml,
            ResourceKind::Milk => self.milk_ml,
            ResourceKind::Beans => self.beans_g,
            ResourceKind::Cups => self.cups,
        }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            water_ml: 2500,
            milk_ml: 1000,
            beans_g: 200,
            cups: 10,
        }
    }
}

/// Current resource levels. Invariant: each level stays within
/// `[0, capacity]`; `spend` only runs after an availability check and
/// `clamp_fill` truncates against the capacity, so neither bound can be
/// crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceLevels {
    pub water_ml: u32,
    pub milk_ml: u32,
    pub beans_g: u32,
    pub cups: u32,
}

impl ResourceLevels {
    /// Levels at full capacity (machine start state).
    #[must_use]
    pub const fn full(capacity: &Capacity) -> Self {
        Self {
            water_ml: capacity.water_ml,
            milk_ml: capacity.milk_ml,
            beans_g: capacity.beans_g,
            cups: capacity.cups,
        }
    }

    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Water => self.water_ml,
            ResourceKind::Milk => self.milk_ml,
            ResourceKind::Beans => self.beans_g,
            ResourceKind::Cups => self.cups,
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Water => &mut self.water_ml,
            ResourceKind::Milk => &mut self.milk_ml,
            ResourceKind::Beans => &mut self.beans_g,
            ResourceKind::Cups => &mut self.cups,
        }
    }

    /// Amount a recipe requires of one resource. Every brew takes one cup.
    const fn required(recipe: &Recipe, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Water => recipe.water_ml,
            ResourceKind::Milk => recipe.milk_ml,
            ResourceKind::Beans => recipe.beans_g,
            ResourceKind::Cups => 1,
        }
    }

    /// Returns the resources with a level strictly below what `recipe`
    /// requires, in fixed check order. Empty means the drink can be made.
    #[must_use]
    pub fn missing_for(&self, recipe: &Recipe) -> Vec<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .filter(|&kind| self.get(kind) < Self::required(recipe, kind))
            .collect()
    }

    /// Deducts the recipe amounts plus one cup.
    ///
    /// Precondition: `missing_for(recipe)` returned empty. The caller
    /// ([`Machine`]) always re-checks before calling, keeping the deduction
    /// from driving any level negative.
    ///
    /// [`Machine`]: crate::Machine
    pub(crate) fn spend(&mut self, recipe: &Recipe) {
        for kind in ResourceKind::ALL {
            *self.get_mut(kind) -= Self::required(recipe, kind);
        }
    }

    /// Applies a refill request, truncating each amount to the remaining
    /// headroom. Negative requests count as zero; nothing is ever removed.
    /// Returns the amounts actually added.
    pub(crate) fn clamp_fill(&mut self, capacity: &Capacity, request: &FillRequest) -> FillReport {
        let mut report = FillReport::default();
        for kind in ResourceKind::ALL {
            let current = self.get(kind);
            let headroom = i64::from(capacity.get(kind) - current);
            let add = request.get(kind).clamp(0, headroom) as u32;
            *self.get_mut(kind) = current + add;
            *report.get_mut(kind) = add;
        }
        report
    }

    /// `true` iff every resource sits at its capacity maximum.
    #[must_use]
    pub fn is_full(&self, capacity: &Capacity) -> bool {
        ResourceKind::ALL
            .into_iter()
            .all(|kind| self.get(kind) >= capacity.get(kind))
    }
}

/// Requested refill amounts. Signed so that careless callers can pass
/// negative numbers and still get the documented treat-as-zero behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillRequest {
    pub water_ml: i64,
    pub milk_ml: i64,
    pub beans_g: i64,
    pub cups: i64,
}

impl FillRequest {
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Water => self.water_ml,
            ResourceKind::Milk => self.milk_ml,
            ResourceKind::Beans => self.beans_g,
            ResourceKind::Cups => self.cups,
        }
    }
}

/// Amounts actually loaded by a refill, after clamping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    pub water_ml: u32,
    pub milk_ml: u32,
    pub beans_g: u32,
    pub cups: u32,
}

impl FillReport {
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Water => self.water_ml,
            ResourceKind::Milk => self.milk_ml,
            ResourceKind::Beans => self.beans_g,
            ResourceKind::Cups => self.cups,
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Water => &mut self.water_ml,
            ResourceKind::Milk => &mut self.milk_ml,
            ResourceKind::Beans => &mut self.beans_g,
            ResourceKind::Cups => &mut self.cups,
        }
    }

    /// `true` if the refill added nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ResourceKind::ALL.into_iter().all(|kind| self.get(kind) == 0)
    }
}
