use std::path::PathBuf;

use adlens_cli::analyze::{run_analyze, AnalyzeOptions};
use adlens_core::ValidationStrategy;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adlens")]
#[command(about = "Campaign performance analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze every campaign and write JSON and Markdown reports
    Analyze {
        /// Input file (.csv or .json); defaults to `ADLENS_DATA_PATH`
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output directory; defaults to `ADLENS_REPORTS_DIR`
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        /// Days per comparison window
        #[arg(long)]
        window_days: Option<usize>,

        /// CTR below which creatives are suggested
        #[arg(long)]
        ctr_threshold: Option<f64>,

        /// Impact strategy: `rules` or `significance`
        #[arg(long)]
        strategy: Option<ValidationStrategy>,

        /// Analyze a single campaign by exact name
        #[arg(long)]
        campaign: Option<String>,

        /// Load and group the input, then stop before analysis
        #[arg(long)]
        dry_run: bool,
    },
    /// Check the input schema and per-campaign history without analyzing
    Validate {
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = adlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Analyze {
            data,
            reports_dir,
            window_days,
            ctr_threshold,
            strategy,
            campaign,
            dry_run,
        }) => {
            let options = AnalyzeOptions {
                data,
                reports_dir,
                window_days,
                ctr_threshold,
                strategy,
                campaign,
                dry_run,
            };
            run_analyze(&config, &options).await?;
        }
        Some(Commands::Validate { data }) => {
            adlens_cli::validate::run_validate(&config, data.as_deref())?;
        }
        Some(Commands::Config) => adlens_cli::settings::print_config(&config)?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
