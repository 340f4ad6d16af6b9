mod collect;
mod export;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fareprobe_core::ResourceKind;
use tracing_subscriber::EnvFilter;

use crate::collect::AxesArgs;

#[derive(Debug, Parser)]
#[command(name = "fareprobe")]
#[command(about = "Disney holiday flight, hotel and ticket price collector")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run every search for a resource and export the results as CSV
    Collect {
        /// Resource to search: flights, hotels or tickets
        resource: ResourceKind,

        #[command(flatten)]
        selection: AxesArgs,

        /// Write the CSV here instead of `<output_dir>/disney_<resource>.csv`
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the searches that would run without touching the network
        #[arg(long)]
        dry_run: bool,
    },
    /// Print how many searches a collect run would perform
    Grid {
        /// Resource to search: flights, hotels or tickets
        resource: ResourceKind,

        #[command(flatten)]
        selection: AxesArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = fareprobe_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Collect {
            resource,
            selection,
            output,
            dry_run,
        }) => {
            collect::run_collect(&config, resource, &selection, output.as_deref(), dry_run).await?;
        }
        Some(Commands::Grid {
            resource,
            selection,
        }) => collect::print_grid(&config, resource, &selection)?,
        None => println!("fareprobe: no command given, see --help"),
    }

    Ok(())
}
