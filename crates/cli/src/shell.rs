//! Interactive menu shell.
//!
//! The shell owns the machine and the admin gate, captures raw text input,
//! parses it into the typed values the engine expects, and renders engine
//! results. Malformed input aborts the current action with a message and
//! never reaches the engine. Domain errors are printed and the loop
//! continues; only the exit option ends the session.
use std::io::{self, BufRead, Write};

use engine::{AdminGate, Drink, EngineError, FillRequest, Machine, MoneyCents, ResourceKind};

use crate::{error::Result, render};

pub struct Shell {
    machine: Machine,
    gate: AdminGate,
}

impl Shell {
    pub fn new(machine: Machine, gate: AdminGate) -> Self {
        Self { machine, gate }
    }

    /// Top-level mode loop. Returns when the user exits or stdin closes.
    pub fn run(&mut self) -> Result<()> {
        println!("Welcome to Cafetera");
        loop {
            println!("\n=== CAFETERA ===");
            println!("1) User mode");
            println!("2) Admin mode");
            println!("3) Exit");
            let Some(choice) = self.prompt("Select option: ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.user_mode()?,
                "2" => self.admin_mode()?,
                "3" => {
                    println!("Session finished. Goodbye!");
                    return Ok(());
                }
                _ => println!("Invalid option, try again."),
            }
        }
    }

    fn user_mode(&mut self) -> Result<()> {
        loop {
            println!(
                "\n=== USER MODE ===   (balance: {})",
                self.machine.wallet()
            );
            println!("1) Insert money into wallet");
            println!("2) Brew a drink");
            println!("3) Refund wallet balance");
            println!("4) Back to main menu");
            let Some(choice) = self.prompt("Select option: ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.action_insert_money()?,
                "2" => self.action_brew_from_wallet()?,
                "3" => self.action_refund_wallet(),
                "4" => return Ok(()),
                _ => println!("Invalid option, try again."),
            }
        }
    }

    fn admin_mode(&mut self) -> Result<()> {
        if !self.admin_login()? {
            return Ok(());
        }
        loop {
            println!("\n=== ADMIN MODE ===");
            println!("1) Brew a drink (cash)");
            println!("2) Refill machine");
            println!("3) Withdraw / donate the till");
            println!("4) Show status");
            println!("5) Change credentials");
            println!("6) Back to main menu");
            let Some(choice) = self.prompt("Select option: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.action_brew_with_cash()?,
                "2" => self.action_refill()?,
                "3" => self.action_withdraw_or_donate()?,
                "4" => println!("\n{}", render::status(&self.machine.snapshot())),
                "5" => self.action_change_credentials()?,
                "6" => break,
                _ => println!("Invalid option, try again."),
            }
        }
        self.gate.logout();
        Ok(())
    }

    /// Runs one login session against the gate. Returns `false` when the
    /// session ends without a successful login (lockout or closed stdin).
    fn admin_login(&mut self) -> Result<bool> {
        println!("\n=== ADMIN LOGIN ===");
        // A fresh attempt sequence per menu entry.
        self.gate.logout();
        loop {
            let Some(username) = self.prompt("Username: ")? else {
                return Ok(false);
            };
            let Some(password) = self.prompt("Password: ")? else {
                return Ok(false);
            };
            match self.gate.login(&username, &password) {
                Ok(()) => {
                    tracing::info!(username, "admin login");
                    println!("Login successful. Welcome to admin mode.");
                    return Ok(true);
                }
                Err(err @ EngineError::LoginFailed { .. }) => println!("{err}"),
                Err(err) => {
                    tracing::warn!("admin login locked out");
                    println!("{err} Returning to main menu.");
                    return Ok(false);
                }
            }
        }
    }

    fn action_insert_money(&mut self) -> Result<()> {
        println!("\n--- Insert money ---");
        let Some(raw) = self.prompt("Amount to add ($): ")? else {
            return Ok(());
        };
        let amount: MoneyCents = match raw.parse() {
            Ok(amount) => amount,
            Err(_) => {
                println!("Invalid input.");
                return Ok(());
            }
        };
        match self.machine.top_up_wallet(amount) {
            Ok(balance) => {
                tracing::info!(%amount, "wallet top-up");
                println!("Balance updated: {balance}");
            }
            Err(err) => println!("{err}"),
        }
        Ok(())
    }

    fn action_refund_wallet(&mut self) {
        println!("\n--- Refund balance ---");
        let refunded = self.machine.refund_wallet();
        if refunded.is_zero() {
            println!("The wallet is empty.");
        } else {
            tracing::info!(%refunded, "wallet refund");
            println!("Refunding {refunded}.");
        }
    }

    fn action_brew_from_wallet(&mut self) -> Result<()> {
        println!("\n--- Brew a drink ---");
        let Some(drink) = self.choose_drink()? else {
            return Ok(());
        };
        match self.machine.brew_from_wallet(drink) {
            Ok(receipt) => {
                tracing::info!(drink = %drink, "brew (wallet)");
                println!("Brewing {drink}... done!");
                println!("{}", render::receipt(&receipt));
                self.offer_remaining_refund()?;
            }
            Err(err) => println!("Cannot brew: {err}"),
        }
        Ok(())
    }

    /// After a wallet purchase, offer to return whatever is left.
    fn offer_remaining_refund(&mut self) -> Result<()> {
        let remaining = self.machine.wallet();
        if remaining.is_zero() {
            return Ok(());
        }
        let Some(answer) =
            self.prompt(&format!("{remaining} left in your wallet. Refund now? (y/n): "))?
        else {
            return Ok(());
        };
        if answer.eq_ignore_ascii_case("y") {
            let refunded = self.machine.refund_wallet();
            println!("Refunding {refunded}.");
        } else {
            println!("The balance stays in your wallet for future purchases.");
        }
        Ok(())
    }

    fn action_brew_with_cash(&mut self) -> Result<()> {
        println!("\n--- Brew a drink ---");
        let Some(drink) = self.choose_drink()? else {
            return Ok(());
        };
        println!("Price: {}", drink.price());
        let Some(raw) = self.prompt("Insert cash ($): ")? else {
            return Ok(());
        };
        let paid: MoneyCents = match raw.parse() {
            Ok(paid) => paid,
            Err(_) => {
                println!("Invalid input; cancelling.");
                return Ok(());
            }
        };
        match self.machine.brew_with_cash(drink, paid) {
            Ok(receipt) => {
                tracing::info!(drink = %drink, %paid, "brew (cash)");
                println!("Brewing {drink}... done!");
                println!("{}", render::receipt(&receipt));
            }
            Err(EngineError::InsufficientFunds { shortfall }) => {
                println!("Insufficient cash, {shortfall} short. Refunding {paid}.");
            }
            Err(err) => println!("Cannot brew: {err}"),
        }
        Ok(())
    }

    fn action_refill(&mut self) -> Result<()> {
        println!("\n--- Refill machine ---");
        if self.machine.is_full() {
            println!("The machine is already at 100% capacity.");
            return Ok(());
        }

        let mut amounts = [0i64; 4];
        for (slot, kind) in amounts.iter_mut().zip(ResourceKind::ALL) {
            let headroom = self.machine.headroom(kind);
            let Some(raw) = self.prompt(&format!(
                "Add {} ({}, max {}): ",
                kind.label(),
                kind.unit(),
                headroom
            ))?
            else {
                return Ok(());
            };
            match parse_quantity(&raw) {
                Some(value) => *slot = value,
                None => {
                    println!("Invalid input.");
                    return Ok(());
                }
            }
        }

        let request = FillRequest {
            water_ml: amounts[0],
            milk_ml: amounts[1],
            beans_g: amounts[2],
            cups: amounts[3],
        };
        let report = self.machine.refill(&request);
        tracing::info!(?report, "refill");
        println!("{}", render::fill_report(&report));
        Ok(())
    }

    fn action_withdraw_or_donate(&mut self) -> Result<()> {
        println!("\n--- Till ---");
        println!("Money in the machine: {}", self.machine.till());
        println!("1) Withdraw everything");
        println!("2) Donate everything to charity");
        println!("3) Cancel");
        let Some(choice) = self.prompt("Choose (1-3): ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                let amount = self.machine.withdraw();
                tracing::info!(%amount, "till withdrawal");
                println!("Withdrew {amount}.");
            }
            "2" => {
                let amount = self.machine.donate();
                tracing::info!(%amount, "till donation");
                println!("Donated {amount} to charity. Thank you!");
            }
            _ => println!("Operation cancelled."),
        }
        Ok(())
    }

    fn action_change_credentials(&mut self) -> Result<()> {
        println!("\n=== CHANGE CREDENTIALS ===");
        println!("Confirm your current identity:");
        let Some(current_user) = self.prompt("Current username: ")? else {
            return Ok(());
        };
        let Some(current_pass) = self.prompt("Current password: ")? else {
            return Ok(());
        };
        println!("Enter the new credentials:");
        let Some(new_user) = self.prompt("New username: ")? else {
            return Ok(());
        };
        let Some(new_pass) = self.prompt("New password: ")? else {
            return Ok(());
        };
        let Some(answer) =
            self.prompt(&format!("Confirm change of username to '{new_user}'? (y/n): "))?
        else {
            return Ok(());
        };
        let confirm = answer.eq_ignore_ascii_case("y");

        match self
            .gate
            .change_credentials(&current_user, &current_pass, &new_user, &new_pass, confirm)
        {
            Ok(true) => {
                tracing::info!("admin credentials changed");
                println!("Credentials updated successfully.");
            }
            Ok(false) => println!("Credential change cancelled."),
            Err(err) => println!("{err}. Operation cancelled."),
        }
        Ok(())
    }

    fn choose_drink(&mut self) -> Result<Option<Drink>> {
        println!(
            "Drinks: 1) Espresso ({})  2) Latte ({})  3) Cappuccino ({})  4) Cancel",
            Drink::Espresso.price(),
            Drink::Latte.price(),
            Drink::Cappuccino.price()
        );
        let Some(choice) = self.prompt("Choose (1-4): ")? else {
            return Ok(None);
        };
        let drink = match choice.as_str() {
            "1" => Drink::Espresso,
            "2" => Drink::Latte,
            "3" => Drink::Cappuccino,
            "4" | "c" | "C" => {
                println!("Operation cancelled.");
                return Ok(None);
            }
            _ => {
                println!("Invalid option.");
                return Ok(None);
            }
        };
        Ok(Some(drink))
    }

    /// Prints a prompt and reads one trimmed line. `None` means stdin closed.
    fn prompt(&self, text: &str) -> Result<Option<String>> {
        print!("{text}");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Parses a refill quantity: blank means zero, anything non-numeric is
/// rejected. Negative values are accepted here and treated as zero by the
/// engine's clamp rule.
fn parse_quantity(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_quantity_means_zero() {
        assert_eq!(parse_quantity(""), Some(0));
        assert_eq!(parse_quantity("   "), Some(0));
    }

    #[test]
    fn numeric_quantities_parse() {
        assert_eq!(parse_quantity("250"), Some(250));
        assert_eq!(parse_quantity(" -3 "), Some(-3));
    }

    #[test]
    fn malformed_quantities_are_rejected() {
        assert_eq!(parse_quantity("ten"), None);
        assert_eq!(parse_quantity("1.5"), None);
    }
}
