//! Budget CLI commands
//!
//! Implements CLI commands for grocery budgets: creation for a month or an
//! explicit period, activation, and spending overview.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_budget_details, format_budget_list, format_expense_list};
use crate::error::PantryResult;
use crate::services::{BudgetService, CreateBudgetInput, ExpenseService, UpdateBudgetInput};
use crate::storage::Storage;

use super::{parse_date, parse_money};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget (defaults to the current month)
    Create {
        /// Amount allowed for the period (e.g., "400" or "400,00")
        amount: String,
        /// First day of the period (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// Last day of the period (defaults to the end of the start month)
        #[arg(short, long)]
        end: Option<String>,
        /// Create the budget inactive
        #[arg(long)]
        inactive: bool,
    },
    /// List budgets with spending
    List,
    /// Show a budget and its expenses (defaults to the current budget)
    Show {
        /// Budget ID
        budget: Option<String>,
    },
    /// Change a budget's amount or period
    Edit {
        /// Budget ID
        budget: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Activate a budget
    Activate {
        /// Budget ID
        budget: String,
    },
    /// Deactivate a budget
    Deactivate {
        /// Budget ID
        budget: String,
    },
    /// Delete a budget and all of its expenses
    Delete {
        /// Budget ID
        budget: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> PantryResult<()> {
    let service = BudgetService::new(storage, settings.user_id);
    let today = settings.today();

    match cmd {
        BudgetCommands::Create {
            amount,
            start,
            end,
            inactive,
        } => {
            let input = CreateBudgetInput {
                amount: parse_money(&amount)?,
                period_start: start.map(|d| parse_date(&d, settings)).transpose()?,
                period_end: end.map(|d| parse_date(&d, settings)).transpose()?,
                is_active: !inactive,
            };

            let budget = service.create(input, today)?;
            println!("Created budget {}: {}", budget.id, budget);
        }

        BudgetCommands::List => {
            let summaries = service.list_with_stats()?;
            println!("{}", format_budget_list(&summaries, settings));
        }

        BudgetCommands::Show { budget } => {
            let budget = match budget {
                Some(identifier) => service.require(&identifier)?,
                None => match service.current(today)? {
                    Some(budget) => budget,
                    None => {
                        println!("No active budget covers today.");
                        println!("Create one with: pantry budget create <amount>");
                        return Ok(());
                    }
                },
            };

            let expenses =
                ExpenseService::new(storage, settings.user_id).list_for_budget(budget.id)?;
            let summary = service.summary(budget)?;

            print!("{}", format_budget_details(&summary, settings));
            println!();
            println!("{}", format_expense_list(&expenses, settings));
        }

        BudgetCommands::Edit {
            budget,
            amount,
            start,
            end,
        } => {
            let budget = service.require(&budget)?;

            let input = UpdateBudgetInput {
                amount: amount.as_deref().map(parse_money).transpose()?,
                period_start: start.map(|d| parse_date(&d, settings)).transpose()?,
                period_end: end.map(|d| parse_date(&d, settings)).transpose()?,
            };

            let updated = service.update(budget.id, input)?;
            println!("Updated budget {}: {}", updated.id, updated);
        }

        BudgetCommands::Activate { budget } => {
            let budget = service.require(&budget)?;
            let updated = service.activate(budget.id)?;
            println!("Activated budget {}", updated.id);
        }

        BudgetCommands::Deactivate { budget } => {
            let budget = service.require(&budget)?;
            let updated = service.deactivate(budget.id)?;
            println!("Deactivated budget {}", updated.id);
        }

        BudgetCommands::Delete { budget, force } => {
            let budget = service.require(&budget)?;

            if !force {
                let count = storage.expenses.get_by_budget(budget.id)?.len();
                println!("About to delete budget {} and {} expense(s)", budget, count);
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let (deleted, expenses) = service.delete(budget.id)?;
            println!(
                "Deleted budget {} and {} expense(s)",
                deleted.id,
                expenses.len()
            );
        }
    }

    Ok(())
}
