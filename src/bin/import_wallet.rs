//! Ğ1 extension - Cesium wallet import wizard
//!
//! Terminal front end for importing a Cesium (Ğ1v1) wallet from its ID and password.

#[cfg(feature = "tui")]
use clap::Parser;
#[cfg(feature = "tui")]
use g1_extension_ui::{
    config::Config,
    import::{ImportSession, Navigation},
    logging::{default_log_path, init_logging, LogTarget},
    tui::run_tui,
    LocalKeyring,
};
#[cfg(feature = "tui")]
use std::{path::PathBuf, sync::Arc};

#[cfg(feature = "tui")]
#[derive(Parser)]
#[command(name = "import-wallet")]
#[command(about = "Import a Cesium wallet into the Ğ1 extension")]
#[command(version)]
struct Args {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address prefix overriding the configured one (-1 for the default)
    #[arg(short, long, allow_hyphen_values = true)]
    prefix: Option<i32>,

    /// Log file (defaults to ~/.g1-extension/ui.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[cfg(feature = "tui")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_logging(&LogTarget::File(
        args.log_file.unwrap_or_else(default_log_path),
    ))?;

    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(prefix) = args.prefix {
        config.settings.prefix = prefix;
    }
    tracing::info!(path = %config_path.display(), "Loaded configuration");

    let keyring = LocalKeyring::new(config.accounts.clone(), config.settings.resolved_prefix());
    let session = ImportSession::new(
        Arc::new(keyring),
        config.chain_registry(),
        config.settings.clone(),
        config.accounts.clone(),
    );

    match run_tui(session).await {
        Ok(Some(Navigation::To(route))) => {
            println!("Account imported, continuing to {}", route);
        }
        Ok(Some(Navigation::Back)) => {
            eprintln!("No account in the extension yet, create one before importing a Cesium wallet");
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Import wizard error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!(
        "TUI feature is not enabled. Please run with: cargo run --bin import-wallet --features tui"
    );
    std::process::exit(1);
}
