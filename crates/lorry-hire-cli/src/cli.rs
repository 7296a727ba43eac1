//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use lorry_hire_domain::model::TdsApplicable;
use lorry_hire_types::{EntityId, OutputFormat};

#[derive(Parser)]
#[command(name = "lorry-hire")]
#[command(version)]
#[command(about = "Lorry hire challans: consignment totals, TDS and balance payable")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend API base URL. Uses config value if not specified.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Money inputs, taken as typed. Anything that is not a number counts as 0.
#[derive(Args, Debug, Clone, Default)]
pub struct MoneyArgs {
    /// Rate per kg
    #[arg(long)]
    pub rate: Option<String>,

    /// Agreed hire amount. Defaults to rate x total weight.
    #[arg(long)]
    pub lorry_hire: Option<String>,

    #[arg(long)]
    pub loading: Option<String>,

    #[arg(long)]
    pub unloading: Option<String>,

    #[arg(long)]
    pub diesel_advance: Option<String>,

    /// GST amount; only counted with --gst
    #[arg(long)]
    pub gst_amount: Option<String>,

    /// Add the GST amount to the total
    #[arg(long)]
    pub gst: Option<bool>,

    /// Advance already paid to the owner
    #[arg(long)]
    pub advance: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TdsArgs {
    /// TDS policy (no, broker, lorryOwner, yes)
    #[arg(long)]
    pub tds: Option<TdsApplicable>,

    /// TDS percentage (0-100)
    #[arg(long)]
    pub tds_rate: Option<String>,

    /// PAN, when it is not taken from the broker or owner
    #[arg(long)]
    pub pan: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChallanArgs {
    #[arg(long)]
    pub challan_number: Option<String>,

    /// Challan date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub challan_date: Option<NaiveDate>,

    /// Lorry hire date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub lorry_hire_date: Option<NaiveDate>,

    #[arg(long)]
    pub vehicle_no: Option<String>,

    #[arg(long)]
    pub slip_no: Option<String>,

    #[arg(long)]
    pub remarks: Option<String>,

    /// Lorry owner id
    #[arg(long)]
    pub owner: Option<EntityId>,

    /// Broker id
    #[arg(long)]
    pub broker: Option<EntityId>,

    /// Destination id
    #[arg(long)]
    pub destination: Option<EntityId>,

    /// Consignment number to add (searched on the backend; repeatable)
    #[arg(long = "cn")]
    pub consignments: Vec<String>,

    /// Consignment id to remove (repeatable)
    #[arg(long = "remove-cn")]
    pub remove_consignments: Vec<EntityId>,

    #[command(flatten)]
    pub money: MoneyArgs,

    #[command(flatten)]
    pub tds: TdsArgs,

    /// Print the payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate a settlement locally, without the backend
    Calc {
        /// Consignment as PACKAGES:WEIGHT (repeatable)
        #[arg(long = "item", short = 'i')]
        items: Vec<String>,

        #[command(flatten)]
        money: MoneyArgs,

        #[command(flatten)]
        tds: TdsArgs,
    },

    /// List challans for the active company, branch and financial year
    List {
        /// Filter by challan number
        #[arg(long)]
        challan_number: Option<String>,
    },

    /// Show one challan with its consignments and settlement
    Show {
        id: EntityId,
    },

    /// Create a challan
    Create {
        #[command(flatten)]
        args: ChallanArgs,
    },

    /// Update a challan; only the given fields change
    Update {
        id: EntityId,

        #[command(flatten)]
        args: ChallanArgs,
    },

    /// Delete a challan
    Delete {
        id: EntityId,
    },

    /// Attach consignments to a saved challan
    AddCn {
        id: EntityId,

        /// Consignment number to attach (searched on the backend; repeatable)
        #[arg(long = "cn", required = true)]
        consignments: Vec<String>,
    },

    /// Detach one consignment from a saved challan
    RemoveCn {
        id: EntityId,

        consignment_id: EntityId,
    },

    /// Mark a challan as paid
    Settle {
        id: EntityId,

        /// Payment date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        payment_date: Option<NaiveDate>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set backend API base URL
        #[arg(long)]
        set_api_url: Option<String>,

        /// Set bearer token (empty string clears it)
        #[arg(long)]
        set_token: Option<String>,

        /// Set active company id
        #[arg(long)]
        set_company: Option<EntityId>,

        /// Set active branch id
        #[arg(long)]
        set_branch: Option<EntityId>,

        /// Set active financial year id
        #[arg(long)]
        set_financial_year: Option<EntityId>,

        /// Set minimum characters before consignment search hits the backend
        #[arg(long)]
        set_search_min_chars: Option<usize>,

        /// Set consignment search debounce in milliseconds
        #[arg(long)]
        set_search_debounce: Option<u64>,

        /// Set request timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
