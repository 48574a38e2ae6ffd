//! The module contains the errors the engine can throw.
//!
//! All of them are recoverable: the caller reports the failure and the
//! machine keeps running. No operation that returns an error leaves the
//! ledger partially mutated.
use thiserror::Error;

use crate::{money::MoneyCents, resources::ResourceKind};

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown drink: {0}")]
    UnknownDrink(String),
    #[error("missing resources: {}", join_kinds(.0))]
    InsufficientResources(Vec<ResourceKind>),
    #[error("insufficient funds: {shortfall} short")]
    InsufficientFunds { shortfall: MoneyCents },
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("wrong username or password ({remaining} attempts left)")]
    LoginFailed { remaining: u8 },
    #[error("too many failed login attempts")]
    TooManyAttempts,
    #[error("current credentials do not match")]
    CredentialMismatch,
    #[error("credentials must not be empty")]
    EmptyCredentialField,
}

fn join_kinds(kinds: &[ResourceKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_resources_lists_labels() {
        let err = EngineError::InsufficientResources(vec![ResourceKind::Water, ResourceKind::Cups]);
        assert_eq!(err.to_string(), "missing resources: water, cups");
    }

    #[test]
    fn insufficient_funds_shows_shortfall() {
        let err = EngineError::InsufficientFunds {
            shortfall: MoneyCents::new(100),
        };
        assert_eq!(err.to_string(), "insufficient funds: $1.00 short");
    }
}
