//! Static drink catalog: the fixed resource cost and price for each drink.
//!
//! The catalog is defined at compile time and never changes at runtime, so
//! historical revenue can always be recomputed from the sales counters and
//! these prices.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, money::MoneyCents};

/// The drinks the machine knows how to brew.
///
/// Using an enum instead of string keys makes "unknown drink" unrepresentable
/// past the parse boundary: [`Drink::from_str`] is the only place that can
/// fail, with [`EngineError::UnknownDrink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drink {
    Espresso,
    Latte,
    Cappuccino,
}

impl Drink {
    /// Every drink, in menu order.
    pub const ALL: [Drink; 3] = [Drink::Espresso, Drink::Latte, Drink::Cappuccino];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Drink::Espresso => "espresso",
            Drink::Latte => "latte",
            Drink::Cappuccino => "cappuccino",
        }
    }

    /// Returns the recipe for this drink.
    #[must_use]
    pub const fn recipe(self) -> &'static Recipe {
        match self {
            Drink::Espresso => &ESPRESSO,
            Drink::Latte => &LATTE,
            Drink::Cappuccino => &CAPPUCCINO,
        }
    }

    /// Shorthand for the catalog price.
    #[must_use]
    pub const fn price(self) -> MoneyCents {
        self.recipe().price
    }
}

impl fmt::Display for Drink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Drink {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "espresso" => Ok(Drink::Espresso),
            "latte" => Ok(Drink::Latte),
            "cappuccino" => Ok(Drink::Cappuccino),
            other => Err(EngineError::UnknownDrink(other.to_string())),
        }
    }
}

/// Resource cost and price for one drink kind. Every brew also consumes one
/// cup, which is not part of the recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recipe {
    pub water_ml: u32,
    pub milk_ml: u32,
    pub beans_g: u32,
    pub price: MoneyCents,
}

const ESPRESSO: Recipe = Recipe {
    water_ml: 250,
    milk_ml: 0,
    beans_g: 16,
    price: MoneyCents::new(4_00),
};

const LATTE: Recipe = Recipe {
    water_ml: 350,
    milk_ml: 75,
    beans_g: 20,
    price: MoneyCents::new(7_00),
};

const CAPPUCCINO: Recipe = Recipe {
    water_ml: 200,
    milk_ml: 100,
    beans_g: 12,
    price: MoneyCents::new(6_00),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Espresso".parse::<Drink>().unwrap(), Drink::Espresso);
        assert_eq!("  latte ".parse::<Drink>().unwrap(), Drink::Latte);
    }

    #[test]
    fn parse_fails_closed_on_unknown_drink() {
        let err = "mocha".parse::<Drink>().unwrap_err();
        assert_eq!(err, EngineError::UnknownDrink("mocha".to_string()));
    }

    #[test]
    fn catalog_prices_are_positive() {
        for drink in Drink::ALL {
            assert!(drink.price().is_positive());
        }
    }
}
