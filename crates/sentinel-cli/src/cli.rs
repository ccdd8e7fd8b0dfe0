use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sentinel", version, about = "Accessibility regression sentinel")]
pub struct Cli {
    #[arg(long, global = true, help = "Database file (overrides config and DB_PATH)")]
    pub db: Option<String>,
    #[arg(long, global = true, help = "Regression webhook URL (overrides config and WEBHOOK_URL)")]
    pub webhook_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or migrate the store.
    InitDb,
    /// Scan a URL or local HTML file and record its barriers.
    Scan {
        target: String,
        #[arg(long, default_value_t = false, help = "Record this scan as the baseline")]
        baseline: bool,
    },
    /// Compare the latest scan of a URL against its baseline.
    CompareBaseline { url: String },
    /// Run the webhook gateway.
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}
