use clap::Parser;
use log::*;

use licensaurus::{Result, cli, command};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("licensaurus")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    // dropping the run future abandons in-flight remote lookups
    tokio::select! {
        result = command::execute(&cli_args) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted: abandoning license collection");
        }
    }

    Ok(())
}
