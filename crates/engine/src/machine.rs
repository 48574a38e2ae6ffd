//! The machine ledger: resource levels, till, user wallet, sales counters,
//! and lifetime withdrawn/donated totals, together with the operations that
//! move them.
//!
//! Every operation either completes fully or leaves the state untouched. The
//! brew operations bundle check, charge, deduction, and sale recording into a
//! single `&mut self` call, so the check-then-spend sequence cannot be
//! interleaved with other mutation.
use chrono::Utc;
use serde::Serialize;

use crate::{
    ResultEngine,
    catalog::Drink,
    error::EngineError,
    money::MoneyCents,
    report::{Receipt, ResourceGauge, StatusReport},
    resources::{Capacity, FillReport, FillRequest, ResourceKind, ResourceLevels},
};

/// Per-drink sales counters. Counters only ever increase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SalesTally {
    pub espresso: u32,
    pub latte: u32,
    pub cappuccino: u32,
}

impl SalesTally {
    fn record(&mut self, drink: Drink) {
        match drink {
            Drink::Espresso => self.espresso += 1,
            Drink::Latte => self.latte += 1,
            Drink::Cappuccino => self.cappuccino += 1,
        }
    }

    #[must_use]
    pub const fn count(&self, drink: Drink) -> u32 {
        match drink {
            Drink::Espresso => self.espresso,
            Drink::Latte => self.latte,
            Drink::Cappuccino => self.cappuccino,
        }
    }
}

/// The mutable machine state.
///
/// Created once at process start with resources at full capacity and all
/// money and counters at zero; mutated exclusively through the methods below;
/// discarded at process exit (no persistence).
#[derive(Clone, Debug)]
pub struct Machine {
    capacity: Capacity,
    levels: ResourceLevels,
    till: MoneyCents,
    wallet: MoneyCents,
    sold: SalesTally,
    withdrawn_total: MoneyCents,
    donated: MoneyCents,
}

impl Machine {
    /// A machine loaded to full capacity with empty till and wallet.
    #[must_use]
    pub fn new(capacity: Capacity) -> Self {
        Self {
            levels: ResourceLevels::full(&capacity),
            capacity,
            till: MoneyCents::ZERO,
            wallet: MoneyCents::ZERO,
            sold: SalesTally::default(),
            withdrawn_total: MoneyCents::ZERO,
            donated: MoneyCents::ZERO,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> &Capacity {
        &self.capacity
    }

    #[must_use]
    pub const fn levels(&self) -> &ResourceLevels {
        &self.levels
    }

    #[must_use]
    pub const fn till(&self) -> MoneyCents {
        self.till
    }

    #[must_use]
    pub const fn wallet(&self) -> MoneyCents {
        self.wallet
    }

    /// Remaining headroom for one resource, for refill prompts.
    #[must_use]
    pub fn headroom(&self, kind: ResourceKind) -> u32 {
        self.capacity.get(kind) - self.levels.get(kind)
    }

    /// Resources currently below what `drink` requires, in fixed check
    /// order. Pure; an empty list means the drink can be brewed.
    #[must_use]
    pub fn missing_for(&self, drink: Drink) -> Vec<ResourceKind> {
        self.levels.missing_for(drink.recipe())
    }

    /// Checks brewability without mutating anything.
    pub fn can_make(&self, drink: Drink) -> ResultEngine<()> {
        let missing = self.missing_for(drink);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(EngineError::InsufficientResources(missing))
        }
    }

    /// Deducts the recipe amounts and one cup, re-checking availability
    /// first so a mistaken caller cannot drive a level negative.
    pub fn spend(&mut self, drink: Drink) -> ResultEngine<()> {
        self.can_make(drink)?;
        self.levels.spend(drink.recipe());
        Ok(())
    }

    /// Debits `price` from the wallet and credits the till.
    ///
    /// Fails with [`EngineError::InsufficientFunds`] (carrying the shortfall)
    /// and no mutation when the wallet balance is below the price.
    pub fn charge_wallet(&mut self, price: MoneyCents) -> ResultEngine<()> {
        if self.wallet < price {
            return Err(EngineError::InsufficientFunds {
                shortfall: price - self.wallet,
            });
        }
        self.wallet -= price;
        self.till += price;
        Ok(())
    }

    /// Brews `drink` paid from the pre-funded wallet: availability check,
    /// wallet debit, resource deduction, and sale recording as one
    /// all-or-nothing step.
    pub fn brew_from_wallet(&mut self, drink: Drink) -> ResultEngine<Receipt> {
        self.can_make(drink)?;
        let price = drink.price();
        self.charge_wallet(price)?;
        self.levels.spend(drink.recipe());
        self.sold.record(drink);

        Ok(Receipt {
            drink,
            price,
            paid: price,
            change: MoneyCents::ZERO,
            issued_at: Utc::now(),
        })
    }

    /// Brews `drink` against a cash payment of `paid`.
    ///
    /// The change on the receipt is `paid - price` and is handed straight
    /// back to the customer; only the price enters the till.
    pub fn brew_with_cash(&mut self, drink: Drink, paid: MoneyCents) -> ResultEngine<Receipt> {
        self.can_make(drink)?;
        let price = drink.price();
        if paid < price {
            return Err(EngineError::InsufficientFunds {
                shortfall: price - paid,
            });
        }
        self.levels.spend(drink.recipe());
        self.till += price;
        self.sold.record(drink);

        Ok(Receipt {
            drink,
            price,
            paid,
            change: paid - price,
            issued_at: Utc::now(),
        })
    }

    /// Adds money to the user wallet. Rejects non-positive amounts without
    /// mutation and returns the new balance.
    pub fn top_up_wallet(&mut self, amount: MoneyCents) -> ResultEngine<MoneyCents> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "top-up amount must be positive".to_string(),
            ));
        }
        self.wallet = self
            .wallet
            .checked_add(amount)
            .ok_or_else(|| EngineError::InvalidAmount("wallet balance overflow".to_string()))?;
        Ok(self.wallet)
    }

    /// Returns the wallet balance to the user and zeroes it. A no-op
    /// returning zero when the wallet is already empty.
    pub fn refund_wallet(&mut self) -> MoneyCents {
        std::mem::take(&mut self.wallet)
    }

    /// Moves the entire till into the lifetime withdrawn total and returns
    /// the amount moved. Zero if the till is already empty.
    pub fn withdraw(&mut self) -> MoneyCents {
        let amount = std::mem::take(&mut self.till);
        self.withdrawn_total += amount;
        amount
    }

    /// Donates the entire till to charity. Same mechanics as [`withdraw`],
    /// targeting the donated total instead.
    ///
    /// [`withdraw`]: Machine::withdraw
    pub fn donate(&mut self) -> MoneyCents {
        let amount = std::mem::take(&mut self.till);
        self.donated += amount;
        amount
    }

    /// Refills resources, truncating each requested amount to the remaining
    /// headroom. Over-requests are silently clamped, never rejected.
    pub fn refill(&mut self, request: &FillRequest) -> FillReport {
        self.levels.clamp_fill(&self.capacity, request)
    }

    /// `true` iff every resource is at its capacity maximum.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.levels.is_full(&self.capacity)
    }

    /// Increments the sales counter for `drink`. The brew operations already
    /// do this; it is public for callers driving the building blocks
    /// themselves.
    pub fn record_sale(&mut self, drink: Drink) {
        self.sold.record(drink);
    }

    #[must_use]
    pub const fn sold(&self) -> &SalesTally {
        &self.sold
    }

    /// Historical revenue: Σ counter × catalog price. Always recomputed,
    /// never stored.
    #[must_use]
    pub fn total_revenue(&self) -> MoneyCents {
        Drink::ALL
            .into_iter()
            .fold(MoneyCents::ZERO, |acc, drink| {
                acc + drink.price().times(self.sold.count(drink))
            })
    }

    /// Read-only structured view over the whole state.
    #[must_use]
    pub fn snapshot(&self) -> StatusReport {
        let gauge = |kind: ResourceKind| ResourceGauge {
            level: self.levels.get(kind),
            capacity: self.capacity.get(kind),
        };

        StatusReport {
            water: gauge(ResourceKind::Water),
            milk: gauge(ResourceKind::Milk),
            beans: gauge(ResourceKind::Beans),
            cups: gauge(ResourceKind::Cups),
            till: self.till,
            wallet: self.wallet,
            sold: self.sold,
            revenue: self.total_revenue(),
            withdrawn_total: self.withdrawn_total,
            donated: self.donated,
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Capacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> Machine {
        Machine::default()
    }

    #[test]
    fn fresh_machine_is_full_and_empty_of_money() {
        let machine = machine();
        assert!(machine.is_full());
        assert_eq!(machine.till(), MoneyCents::ZERO);
        assert_eq!(machine.wallet(), MoneyCents::ZERO);
        assert_eq!(machine.total_revenue(), MoneyCents::ZERO);
    }

    #[test]
    fn brew_from_wallet_moves_price_to_till() {
        let mut machine = machine();
        machine.top_up_wallet(MoneyCents::new(10_00)).unwrap();

        let receipt = machine.brew_from_wallet(Drink::Espresso).unwrap();

        assert_eq!(receipt.price, MoneyCents::new(4_00));
        assert_eq!(receipt.change, MoneyCents::ZERO);
        assert_eq!(machine.wallet(), MoneyCents::new(6_00));
        assert_eq!(machine.till(), MoneyCents::new(4_00));
        assert_eq!(machine.sold().espresso, 1);
    }

    #[test]
    fn brew_from_wallet_shortfall_leaves_state_untouched() {
        let mut machine = machine();
        machine.top_up_wallet(MoneyCents::new(3_00)).unwrap();

        let err = machine.brew_from_wallet(Drink::Espresso).unwrap_err();

        assert_eq!(
            err,
            EngineError::InsufficientFunds {
                shortfall: MoneyCents::new(1_00)
            }
        );
        assert_eq!(machine.wallet(), MoneyCents::new(3_00));
        assert_eq!(machine.till(), MoneyCents::ZERO);
        assert!(machine.is_full());
        assert_eq!(machine.sold().espresso, 0);
    }

    #[test]
    fn brew_with_cash_reports_change_but_banks_only_price() {
        let mut machine = machine();

        let receipt = machine
            .brew_with_cash(Drink::Cappuccino, MoneyCents::new(10_00))
            .unwrap();

        assert_eq!(receipt.change, MoneyCents::new(4_00));
        assert_eq!(machine.till(), MoneyCents::new(6_00));
        assert_eq!(machine.sold().cappuccino, 1);
    }

    #[test]
    fn brew_with_cash_underpayment_is_rejected() {
        let mut machine = machine();

        let err = machine
            .brew_with_cash(Drink::Latte, MoneyCents::new(5_00))
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::InsufficientFunds {
                shortfall: MoneyCents::new(2_00)
            }
        );
        assert!(machine.is_full());
        assert_eq!(machine.till(), MoneyCents::ZERO);
    }

    #[test]
    fn brew_without_resources_reports_missing_and_keeps_money() {
        let mut machine = machine();
        machine.top_up_wallet(MoneyCents::new(20_00)).unwrap();
        // Ten cups in a fresh machine.
        for _ in 0..10 {
            machine.brew_with_cash(Drink::Espresso, MoneyCents::new(4_00)).unwrap();
        }

        let err = machine.brew_from_wallet(Drink::Espresso).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientResources(vec![ResourceKind::Water, ResourceKind::Cups])
        );
        assert_eq!(machine.wallet(), MoneyCents::new(20_00));
    }

    #[test]
    fn spend_rechecks_availability() {
        let mut machine = machine();
        for _ in 0..10 {
            machine.spend(Drink::Espresso).unwrap();
        }
        assert!(machine.spend(Drink::Espresso).is_err());
        assert_eq!(machine.levels().cups, 0);
    }

    #[test]
    fn top_up_rejects_zero() {
        let mut machine = machine();
        assert!(machine.top_up_wallet(MoneyCents::ZERO).is_err());
        assert_eq!(machine.wallet(), MoneyCents::ZERO);
    }

    #[test]
    fn refund_round_trips_the_top_up() {
        let mut machine = machine();
        machine.top_up_wallet(MoneyCents::new(7_50)).unwrap();

        assert_eq!(machine.refund_wallet(), MoneyCents::new(7_50));
        assert_eq!(machine.wallet(), MoneyCents::ZERO);
        assert_eq!(machine.refund_wallet(), MoneyCents::ZERO);
    }

    #[test]
    fn withdraw_conserves_the_till() {
        let mut machine = machine();
        machine
            .brew_with_cash(Drink::Latte, MoneyCents::new(7_00))
            .unwrap();
        let till_before = machine.till();

        let moved = machine.withdraw();

        assert_eq!(moved, till_before);
        assert_eq!(machine.till(), MoneyCents::ZERO);
        assert_eq!(machine.withdraw(), MoneyCents::ZERO);
        assert_eq!(machine.snapshot().withdrawn_total, till_before);
    }

    #[test]
    fn donate_targets_the_donated_total() {
        let mut machine = machine();
        machine
            .brew_with_cash(Drink::Espresso, MoneyCents::new(4_00))
            .unwrap();

        assert_eq!(machine.donate(), MoneyCents::new(4_00));
        let report = machine.snapshot();
        assert_eq!(report.donated, MoneyCents::new(4_00));
        assert_eq!(report.withdrawn_total, MoneyCents::ZERO);
    }

    #[test]
    fn revenue_is_recomputed_from_counters() {
        let mut machine = machine();
        machine
            .brew_with_cash(Drink::Espresso, MoneyCents::new(4_00))
            .unwrap();
        machine
            .brew_with_cash(Drink::Latte, MoneyCents::new(7_00))
            .unwrap();
        machine.withdraw();

        // Withdrawing the till does not touch historical revenue.
        assert_eq!(machine.total_revenue(), MoneyCents::new(11_00));
    }

    #[test]
    fn snapshot_is_idempotent() {
        let mut machine = machine();
        machine
            .brew_with_cash(Drink::Espresso, MoneyCents::new(5_00))
            .unwrap();

        let first = machine.snapshot();
        let second = machine.snapshot();
        assert_eq!(first, second);
    }

    #[test]
    fn refill_restores_a_drained_machine() {
        let mut machine = machine();
        for _ in 0..5 {
            machine.spend(Drink::Latte).unwrap();
        }
        assert!(!machine.is_full());

        let report = machine.refill(&FillRequest {
            water_ml: 99_999,
            milk_ml: 99_999,
            beans_g: 99_999,
            cups: 99,
        });

        assert_eq!(report.water_ml, 5 * 350);
        assert_eq!(report.milk_ml, 5 * 75);
        assert_eq!(report.beans_g, 5 * 20);
        assert_eq!(report.cups, 5);
        assert!(machine.is_full());
    }
}
