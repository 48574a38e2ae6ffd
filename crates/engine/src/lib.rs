//! Resource and ledger state machine for a self-service coffee vending
//! machine.
//!
//! The engine tracks consumable inventory (water, milk, beans, cups), cash
//! (till, user wallet, lifetime withdrawn/donated totals), and per-drink
//! sales counters. It exposes operations to brew a drink (wallet or cash
//! payment), refill supplies with capacity clamping, manage cash, and report
//! status, plus an attempt-limited admin gate. Presentation (menus, input
//! parsing, rendering) lives in the `cafetera` binary; the engine does no
//! I/O.
pub use auth::{AdminCredentials, AdminGate, MAX_LOGIN_ATTEMPTS};
pub use catalog::{Drink, Recipe};
pub use error::EngineError;
pub use machine::{Machine, SalesTally};
pub use money::MoneyCents;
pub use report::{Receipt, ResourceGauge, StatusReport};
pub use resources::{Capacity, FillReport, FillRequest, ResourceKind, ResourceLevels};

mod auth;
mod catalog;
mod error;
mod machine;
mod money;
mod report;
mod resources;

type ResultEngine<T> = Result<T, EngineError>;
