use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use serde::Serialize;
use time::{Date, OffsetDateTime, macros::format_description};

use fintrack_rs::{
    DashboardAnalytics, DashboardConfig, NewTransaction, Transaction, TransactionKind,
    analyze_with,
    config::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_TRANSACTION_LIMIT},
    dashboard::{
        DashboardSummary, RECENT_TRANSACTION_COUNT, dashboard_charts,
        normalize::{Normalizer, resolve_amount, resolve_category},
        recent_transactions, summarize,
    },
    format::format_currency,
    initialize_db,
    logging::setup_logging,
    transaction::{DEFAULT_CURRENCY, create_transaction, get_recent_transactions},
};

/// Record income and expenses and summarize them by month and topic.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log debug messages to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// The timezone used to decide which month a timestamp falls in, e.g. "Asia/Kolkata".
    #[arg(long, global = true, env = "FINTRACK_TIMEZONE")]
    timezone: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the transaction table in a new or existing database.
    Init {
        /// File path to the SQLite database.
        #[arg(long)]
        db_path: PathBuf,
    },
    /// Record a single transaction.
    Add {
        /// File path to the SQLite database.
        #[arg(long)]
        db_path: PathBuf,

        /// Either "income" or "expense".
        #[arg(long)]
        kind: TransactionKind,

        /// What the transaction was for, e.g. "Salary".
        #[arg(long)]
        topic: String,

        /// The amount of money earned or spent.
        #[arg(long)]
        amount: f64,

        /// The date the transaction happened as YYYY-MM-DD. Defaults to today (UTC).
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        /// The ISO 4217 currency code.
        #[arg(long, default_value = DEFAULT_CURRENCY)]
        currency: String,
    },
    /// Summarize the most recent transactions in the database.
    Report {
        /// File path to the SQLite database.
        #[arg(long)]
        db_path: PathBuf,

        /// How many of the most recent transactions to include.
        #[arg(long, default_value_t = DEFAULT_TRANSACTION_LIMIT)]
        limit: u32,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Summarize transactions exported as a JSON array.
    Analyze {
        /// File path to the JSON export.
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// How to print the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// The symbol shown in front of amounts.
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency_symbol: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// A plain text table.
    Text,
    /// The summary and chart series as JSON.
    Json,
    /// The ECharts options for each chart, each preceded by the chart's ID.
    Charts,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: DashboardSummary,
    recent_transactions: &'a [Transaction],
    analytics: &'a DashboardAnalytics,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(args.verbose);

    match args.command {
        Command::Init { db_path } => {
            let conn = Connection::open(&db_path)?;
            initialize_db(&conn)?;
            println!("Initialized database at {db_path:#?}");
        }
        Command::Add {
            db_path,
            kind,
            topic,
            amount,
            date,
            currency,
        } => {
            let conn = open_existing(&db_path)?;
            let occurred_at = date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
            let transaction = create_transaction(
                NewTransaction::build(kind, &topic, amount, occurred_at).currency(&currency),
                &conn,
            )?;

            match transaction.id {
                Some(id) => println!("Recorded {kind} transaction #{id}"),
                None => println!("Recorded {kind} transaction"),
            }
        }
        Command::Report {
            db_path,
            limit,
            output,
        } => {
            let config = DashboardConfig {
                local_timezone: args.timezone,
                transaction_limit: limit,
                currency_symbol: output.currency_symbol.clone(),
            };
            let normalizer = config.normalizer()?;
            let conn = open_existing(&db_path)?;
            let transactions = get_recent_transactions(config.transaction_limit, &conn)?;
            tracing::info!("Loaded {} transactions from {db_path:#?}", transactions.len());

            print_report(&normalizer, &transactions, &output)?;
        }
        Command::Analyze { file, output } => {
            let config = DashboardConfig {
                local_timezone: args.timezone,
                currency_symbol: output.currency_symbol.clone(),
                ..Default::default()
            };
            let normalizer = config.normalizer()?;
            let transactions: Vec<Transaction> = serde_json::from_str(&fs::read_to_string(&file)?)?;
            tracing::info!("Read {} transactions from {file:#?}", transactions.len());

            print_report(&normalizer, &transactions, &output)?;
        }
    }

    Ok(())
}

fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
}

/// Open a database that must already exist, so a typo does not silently create a new file.
fn open_existing(db_path: &Path) -> Result<Connection, Box<dyn Error>> {
    if !db_path.is_file() {
        eprintln!("No database at {db_path:#?}. Create one with `fintrack init --db-path <PATH>`.");
        exit(1);
    }

    Ok(Connection::open(db_path)?)
}

fn print_report(
    normalizer: &Normalizer,
    transactions: &[Transaction],
    output: &OutputArgs,
) -> Result<(), Box<dyn Error>> {
    let summary = summarize(transactions);
    let recent = recent_transactions(transactions, RECENT_TRANSACTION_COUNT);
    let analytics = analyze_with(normalizer, transactions);

    match output.format {
        OutputFormat::Text => print_text_report(&summary, recent, &analytics, &output.currency_symbol),
        OutputFormat::Json => {
            let report = Report {
                summary,
                recent_transactions: recent,
                analytics: &analytics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Charts => {
            for chart in dashboard_charts(&analytics, &output.currency_symbol) {
                println!("{}\n{}\n", chart.id, chart.options);
            }
        }
    }

    Ok(())
}

fn print_text_report(
    summary: &DashboardSummary,
    recent: &[Transaction],
    analytics: &DashboardAnalytics,
    currency_symbol: &str,
) {
    let money = |amount: f64| format_currency(amount, currency_symbol);

    println!(
        "Total income:  {:>14}  from {} transactions",
        money(summary.total_income),
        summary.income_count
    );
    println!(
        "Total expense: {:>14}  from {} transactions",
        money(summary.total_expense),
        summary.expense_count
    );
    println!("Net balance:   {:>14}", money(summary.net_balance));
    if summary.is_deficit() {
        println!("You spent more than you earned.");
    }

    println!();
    println!("Recent transactions");
    if recent.is_empty() {
        println!("  No transactions yet.");
    }
    for transaction in recent {
        let kind = TransactionKind::from_raw(transaction.kind.as_deref());
        let date = transaction
            .occurred_at
            .as_deref()
            .or(transaction.date.as_deref())
            .or(transaction.created_at.as_deref())
            .unwrap_or("-");
        let topic = resolve_category(transaction.topic.as_deref());
        println!(
            "  {date:<12} {kind:<8} {topic:<20} {:>14}",
            money(resolve_amount(&transaction.amount))
        );
    }

    println!();
    println!("Monthly totals");
    for (total, net) in analytics.monthly_totals.iter().zip(&analytics.monthly_net) {
        println!(
            "  {:<8} income {:>14}  expense {:>14}  net {:>14}",
            total.month,
            money(total.income),
            money(total.expense),
            money(net.net)
        );
    }

    for (title, slices) in [
        ("Expense by topic", &analytics.expense_by_category),
        ("Income by topic", &analytics.income_by_category),
    ] {
        println!();
        println!("{title}");
        if slices.is_empty() {
            println!("  No data.");
        }
        for slice in slices {
            println!("  {:<20} {:>14}", slice.name, money(slice.value));
        }
    }
}
