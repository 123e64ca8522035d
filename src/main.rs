use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pantry_cli::cli::{
    handle_budget_command, handle_dashboard_command, handle_expense_command,
    handle_export_command, handle_history_command, handle_item_command, handle_product_command,
};
use pantry_cli::config::{paths::PantryPaths, settings::Settings};
use pantry_cli::format::Locale;
use pantry_cli::PantryError;
use pantry_cli::storage::{init::initialize_storage, Storage};

/// Environment variable holding the tracing filter (e.g. "debug")
const LOG_ENV: &str = "PANTRY_LOG";

#[derive(Parser)]
#[command(
    name = "pantry",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based grocery inventory, expiry and budget tracker",
    long_about = "PantryCLI keeps track of the food you have at home: what expires \
                  soon, how healthy your stock is according to Nutri-Score, and how \
                  much of your monthly grocery budget is left."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Product catalogue commands
    #[command(subcommand)]
    Product(pantry_cli::cli::ProductCommands),

    /// Inventory commands
    #[command(subcommand, alias = "items")]
    Item(pantry_cli::cli::ItemCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(pantry_cli::cli::BudgetCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(pantry_cli::cli::ExpenseCommands),

    /// Show the dashboard
    Dashboard {
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export data
    #[command(subcommand)]
    Export(pantry_cli::cli::ExportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show or change configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    /// Display locale (fr-FR, en-US)
    #[arg(long)]
    locale: Option<String>,
    /// Currency symbol
    #[arg(long)]
    currency: Option<String>,
    /// Fixed UTC offset in minutes ("none" follows the system timezone)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,
    /// Number of recent items on the dashboard
    #[arg(long)]
    recent_items: Option<usize>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = PantryPaths::new()?;

    // The owner id lives in the settings file, so it must exist before any data does
    let first_run = !paths.is_initialized();
    let mut settings = if first_run {
        initialize_storage(&paths)?
    } else {
        Settings::load_or_create(&paths)?
    };

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Tui) => {
            pantry_cli::tui::run_tui(&storage, &settings)?;
        }
        Some(Commands::Product(cmd)) => {
            handle_product_command(&storage, cmd)?;
        }
        Some(Commands::Item(cmd)) => {
            handle_item_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Dashboard { json }) => {
            handle_dashboard_command(&storage, &settings, json)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        Some(Commands::Init) => {
            if first_run {
                println!("Initialized PantryCLI at: {}", paths.base_dir().display());
            } else {
                println!("PantryCLI already initialized at: {}", paths.base_dir().display());
            }
            println!();
            println!("Next steps:");
            println!("  pantry product add \"Lait demi-écrémé\" --unit l --nutri B");
            println!("  pantry item add \"Lait demi-écrémé\" 2 --expires 2025-03-20");
            println!("  pantry budget create 400");
        }
        Some(Commands::Config(args)) => {
            handle_config(&paths, &mut settings, args)?;
        }
        None => {
            println!("PantryCLI - Terminal-based grocery tracker");
            println!();
            println!("Run 'pantry --help' for usage information.");
            println!("Run 'pantry dashboard' for an overview or 'pantry tui' for the live view.");
        }
    }

    Ok(())
}

fn handle_config(paths: &PantryPaths, settings: &mut Settings, args: ConfigArgs) -> Result<()> {
    let mut changed = false;

    if let Some(locale) = args.locale {
        settings.locale = locale.parse::<Locale>().map_err(anyhow::Error::msg)?;
        changed = true;
    }
    if let Some(currency) = args.currency {
        settings.currency_symbol = currency;
        changed = true;
    }
    if let Some(offset) = args.utc_offset {
        let minutes = if offset.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(offset.trim().parse::<i32>().map_err(|_| {
                PantryError::Validation(format!("Invalid UTC offset: {}", offset))
            })?)
        };
        settings.set_utc_offset(minutes)?;
        changed = true;
    }
    if let Some(recent) = args.recent_items {
        settings.recent_items_limit = recent;
        changed = true;
    }

    if changed {
        settings.save(paths)?;
        println!("Settings saved.");
        println!();
    }

    println!("PantryCLI Configuration");
    println!("=======================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  User ID:       {}", settings.user_id);
    println!("  Locale:        {}", settings.locale);
    println!("  Currency:      {}", settings.currency_symbol);
    match settings.utc_offset_minutes {
        Some(minutes) => println!("  UTC offset:    {} min", minutes),
        None => println!("  UTC offset:    system"),
    }
    println!("  Recent items:  {}", settings.recent_items_limit);
    println!(
        "  Receipt poll:  every {} ms, {} attempts max",
        settings.poll_interval_ms, settings.poll_max_attempts
    );

    Ok(())
}
