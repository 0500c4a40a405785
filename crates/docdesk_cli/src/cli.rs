//! Command-line surface.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use docdesk_core::config::DEFAULT_CONFIG_FILE;
use docdesk_core::{DocumentId, DocumentKind};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docdesk", version, about = "Invoices, payments and payment orders")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Database file (overrides config file)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Log level (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides config file)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage invoices
    Invoice {
        #[command(subcommand)]
        action: Action,
    },
    /// Manage payments
    Payment {
        #[command(subcommand)]
        action: Action,
    },
    /// Manage payment orders
    PaymentOrder {
        #[command(subcommand)]
        action: Action,
    },
    /// Print every document caption in list order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Write one document to a block file
    Export {
        kind: KindArg,
        id: DocumentId,
        file: PathBuf,
    },
    /// Store the document in a block file
    Import { file: PathBuf },
    /// Smoke check
    Ping,
    /// Print the core version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Create a document; prints its id
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print the details view, or the stored record as JSON
    Show {
        id: DocumentId,
        #[arg(long)]
        json: bool,
    },
    /// Replace the given fields; others keep their stored values
    Update {
        id: DocumentId,
        #[command(flatten)]
        fields: FieldArgs,
    },
    Delete { id: DocumentId },
    /// Store every record of a comma-delimited file
    ImportLines { file: PathBuf },
    /// Write every stored record as comma-delimited lines
    ExportLines { file: PathBuf },
    /// Write one document as a labelled record file
    SaveFile { id: DocumentId, file: PathBuf },
    /// Store the document in a labelled record file
    LoadFile { file: PathBuf },
}

/// Document fields. Each kind accepts only its own subset.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(long)]
    pub number: Option<String>,
    /// ISO date; defaults to today on add
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub user: Option<String>,
    #[arg(long)]
    pub amount: Option<Decimal>,
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub currency_rate: Option<Decimal>,
    #[arg(long)]
    pub product: Option<String>,
    #[arg(long)]
    pub quantity: Option<Decimal>,
    #[arg(long)]
    pub employee: Option<String>,
    #[arg(long)]
    pub contractor: Option<String>,
    #[arg(long)]
    pub commission: Option<Decimal>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum KindArg {
    Invoice,
    Payment,
    PaymentOrder,
}

impl From<KindArg> for DocumentKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Invoice => DocumentKind::Invoice,
            KindArg::Payment => DocumentKind::Payment,
            KindArg::PaymentOrder => DocumentKind::PaymentOrder,
        }
    }
}
