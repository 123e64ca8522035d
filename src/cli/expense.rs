//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{self, format_expense_list};
use crate::error::{PantryError, PantryResult};
use crate::format::format_date;
use crate::models::ReceiptId;
use crate::services::{BudgetService, CreateExpenseInput, ExpenseService, UpdateExpenseInput};
use crate::storage::Storage;

use super::{clearable, parse_date, parse_money};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Log a grocery expense
    Add {
        /// Amount spent (e.g., "42,50")
        amount: String,
        /// Date of the purchase (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Budget ID (defaults to the active budget on that date)
        #[arg(short, long)]
        budget: Option<String>,
        /// Where the money was spent
        #[arg(short, long)]
        source: Option<String>,
        /// Receipt the expense was read from
        #[arg(long)]
        receipt: Option<String>,
    },
    /// List the expenses of a budget (defaults to the current budget)
    List {
        /// Budget ID
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// Edit an expense ("none" clears the source)
    Edit {
        /// Expense ID
        expense: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> PantryResult<()> {
    let service = ExpenseService::new(storage, settings.user_id);
    let budgets = BudgetService::new(storage, settings.user_id);
    let today = settings.today();

    match cmd {
        ExpenseCommands::Add {
            amount,
            date,
            budget,
            source,
            receipt,
        } => {
            let date = match date {
                Some(d) => parse_date(&d, settings)?,
                None => today,
            };

            let mut input = CreateExpenseInput::new(parse_money(&amount)?, date);
            input.budget_id = match budget {
                Some(identifier) => Some(budgets.require(&identifier)?.id),
                None => None,
            };
            input.source = source;
            input.receipt_id = receipt
                .map(|r| {
                    r.parse::<ReceiptId>()
                        .map_err(|_| PantryError::Validation(format!("Invalid receipt id: {}", r)))
                })
                .transpose()?;

            let expense = service.create(input)?;
            let stats = budgets.stats(expense.budget_id)?;
            println!(
                "Logged {} on {} ({})",
                display::money(settings, expense.amount),
                format_date(expense.date, settings.locale),
                expense.id
            );
            println!(
                "Budget: {}% used, {} remaining",
                stats.percentage,
                display::money(settings, stats.remaining)
            );
        }

        ExpenseCommands::List { budget } => {
            let budget = match budget {
                Some(identifier) => budgets.require(&identifier)?,
                None => match budgets.current(today)? {
                    Some(budget) => budget,
                    None => {
                        println!("No active budget covers today.");
                        return Ok(());
                    }
                },
            };

            println!("Expenses for budget {}: {}", budget.id, budget);
            let expenses = service.list_for_budget(budget.id)?;
            println!("{}", format_expense_list(&expenses, settings));
        }

        ExpenseCommands::Edit {
            expense,
            amount,
            date,
            source,
        } => {
            let expense = service.require(&expense)?;

            let input = UpdateExpenseInput {
                amount: amount.as_deref().map(parse_money).transpose()?,
                date: date.map(|d| parse_date(&d, settings)).transpose()?,
                source: clearable(source),
            };

            let updated = service.update(expense.id, input)?;
            println!("Updated expense: {}", updated);
        }

        ExpenseCommands::Delete { expense } => {
            let expense = service.require(&expense)?;
            let deleted = service.delete(expense.id)?;
            println!("Deleted expense: {}", deleted);
        }
    }

    Ok(())
}
