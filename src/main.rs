//! BankDash CLI - demo banking dashboard in the terminal
//!
//! Every invocation restores the session mirrored by the previous one:
//!
//! ```text
//! bankdash login --email admin@bank.com --password password
//! bankdash transfer --to 3 --amount 2000 --yes
//! bankdash history --type debit
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;

use bankdash::account::{AccountId, AccountType, RegisterRequest};
use bankdash::app::AppState;
use bankdash::config::AppConfig;
use bankdash::history::{DateRange, KindFilter, Page, Transaction, TransactionFilter};
use bankdash::logging::init_logging;
use bankdash::money::format_kes;

/// BankDash - demo banking dashboard
#[derive(Parser)]
#[command(
    name = "bankdash",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// Configuration profile, read from config/<env>.yaml
    #[arg(long, env = "BANKDASH_ENV", default_value = "dev", global = true)]
    env: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an email and the demo password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the current account and dashboard summary
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open a new account and log in to it
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// savings or checking
        #[arg(long, default_value = "savings")]
        account_type: AccountType,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Send money to another account (lists receivers when --to is omitted)
    Transfer {
        /// Receiver account ID
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        note: Option<String>,
        /// Confirm without stopping at the summary
        #[arg(long, short)]
        yes: bool,
    },

    /// Show the current account's transactions
    History {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Write every matching transaction to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Admin dashboard (admin session required)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Headline numbers
    Stats,
    /// List customers
    Users {
        /// Match against name or email
        #[arg(long, default_value = "")]
        search: String,
    },
    /// One customer with their transactions
    User {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Transactions across every account
    Transactions {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Case-insensitive match on description, counterparty or account
    #[arg(long, default_value = "")]
    search: String,
    /// all, credit or debit
    #[arg(long = "type", default_value = "all")]
    kind: KindFilter,
    /// all, week or month
    #[arg(long, default_value = "all")]
    range: DateRange,
}

impl From<FilterArgs> for TransactionFilter {
    fn from(args: FilterArgs) -> Self {
        TransactionFilter {
            search: args.search,
            kind: args.kind,
            range: args.range,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(&cli.env)?;
    let _guard = init_logging(&config);
    info!(env = %cli.env, git = env!("GIT_HASH"), "bankdash starting");

    let app = AppState::from_config(config);
    app.restore().await;

    match cli.command {
        Commands::Login { email, password } => {
            let account = app.session.login(&email, &password).await?;
            println!("Welcome back, {}", account.name);
        }
        Commands::Logout => {
            app.session.logout().await;
            println!("Logged out");
        }
        Commands::Whoami { json } => whoami(&app, json).await?,
        Commands::Register {
            name,
            email,
            account_type,
            address,
            phone,
        } => {
            let mut req = RegisterRequest::new(name, email, account_type);
            req.address = address;
            req.phone = phone;
            let account = app.session.register(req).await?;
            println!("Account created: {} [{}]", account.label(), account.id);
        }
        Commands::Transfer {
            to,
            amount,
            note,
            yes,
        } => transfer(&app, to, amount, note, yes).await?,
        Commands::History {
            filter,
            page,
            export,
            json,
        } => history(&app, filter.into(), page, export, json).await?,
        Commands::Admin { command } => admin(&app, command).await?,
    }

    Ok(())
}

async fn whoami(app: &AppState, json: bool) -> Result<()> {
    let account = app.session.require_current().await?;
    let summary = app.history.summary().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
        return Ok(());
    }

    println!("{} [{}]", account.label(), account.id);
    println!(
        "{} account{}",
        account.account_type,
        if account.is_admin { " (admin)" } else { "" }
    );
    println!("Balance:           {}", format_kes(summary.balance));
    println!("Total deposits:    {}", format_kes(summary.total_deposits));
    println!("Total withdrawals: {}", format_kes(summary.total_withdrawals));
    println!("Pending:           {}", summary.pending_count);
    if !summary.recent.is_empty() {
        println!();
        println!("Recent transactions");
        print_transactions(&summary.recent);
    }
    Ok(())
}

async fn transfer(
    app: &AppState,
    to: Option<String>,
    amount: Option<String>,
    note: Option<String>,
    yes: bool,
) -> Result<()> {
    let workflow = &app.transfer;

    let Some(to) = to else {
        println!("Available receivers:");
        for account in workflow.eligible_receivers().await? {
            println!("  {:<28} {}", account.id, account.label());
        }
        return Ok(());
    };

    workflow.select_receiver(&AccountId::new(to)).await?;
    workflow.set_amount(amount.as_deref().unwrap_or_default()).await?;
    workflow.set_note(note.as_deref().unwrap_or_default()).await?;

    let summary = workflow.submit().await?;
    println!("Transfer to:     {}", summary.receiver.name);
    println!("Amount:          {}", format_kes(summary.amount));
    if let Some(note) = &summary.note {
        println!("Note:            {}", note);
    }
    println!("Balance after:   {}", format_kes(summary.resulting_balance));

    if !yes {
        println!();
        println!("Nothing sent. Re-run with --yes to confirm.");
        workflow.reset().await;
        return Ok(());
    }

    println!("Processing...");
    let receipt = workflow.confirm().await?;
    println!();
    println!("Transfer successful");
    println!("Transaction ID:  {}", receipt.receipt_id);
    println!("New balance:     {}", format_kes(receipt.new_balance));
    println!(
        "Completed at:    {}",
        receipt.completed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

async fn history(
    app: &AppState,
    filter: TransactionFilter,
    page: usize,
    export: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let today = Local::now().date_naive();

    if let Some(path) = export {
        let csv = app.history.export(&filter, today).await?;
        tokio::fs::write(&path, csv)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Exported to {}", path.display());
        return Ok(());
    }

    let page = app.history.page(&filter, page, today).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    print_page(&page);
    Ok(())
}

async fn admin(app: &AppState, command: AdminCommands) -> Result<()> {
    match command {
        AdminCommands::Stats => {
            let overview = app.admin.overview().await?;
            println!("Total users:         {}", overview.total_users);
            println!("Low balance users:   {}", overview.low_balance_users);
            println!("Transactions:        {}", overview.total_transactions);
            println!("Total volume:        {}", format_kes(overview.total_volume));
        }
        AdminCommands::Users { search } => {
            for row in app.admin.users(&search).await? {
                println!(
                    "  {:<28} {:<32} {:>16}  {}",
                    row.account.id,
                    row.account.label(),
                    format_kes(row.account.balance),
                    row.status
                );
            }
        }
        AdminCommands::User { id, page } => {
            let Some(detail) = app
                .admin
                .user_detail(&AccountId::new(id.as_str()), page)
                .await?
            else {
                bail!("User not found: {}", id);
            };
            let account = &detail.account;
            println!("{} [{}]", account.label(), account.id);
            println!("{} account, {}", account.account_type, detail.status);
            println!("Balance: {}", format_kes(account.balance));
            if let Some(phone) = &account.phone {
                println!("Phone:   {}", phone);
            }
            if let Some(address) = &account.address {
                println!("Address: {}", address);
            }
            println!();
            print_page(&detail.transactions);
        }
        AdminCommands::Transactions { filter, page } => {
            let today = Local::now().date_naive();
            let page = app.admin.transactions(&filter.into(), page, today).await?;
            print_page(&page);
        }
    }
    Ok(())
}

fn print_page(page: &Page<Transaction>) {
    if page.items.is_empty() {
        println!("No transactions found");
        return;
    }
    print_transactions(&page.items);
    println!();
    println!(
        "Showing {} to {} of {} (page {}/{})",
        page.showing_from(),
        page.showing_to(),
        page.total_items,
        page.page,
        page.total_pages
    );
}

fn print_transactions(txs: &[Transaction]) {
    for tx in txs {
        let sign = if tx.is_credit() { "+" } else { "-" };
        println!(
            "  {}  {:<28} {:<16} {}{:<14} {}",
            tx.date,
            tx.description,
            tx.counterparty.as_deref().unwrap_or("-"),
            sign,
            format_kes(tx.amount),
            tx.status
        );
    }
}
