//! Print an address as the account card would display it

use clap::Parser;
use g1_extension_ui::{
    account::KeyType,
    address::recode,
    chain::ChainResolver,
    config::Config,
    logging::{init_logging, LogTarget},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recode-address")]
#[command(about = "Recode an address for a network prefix and match it against known accounts")]
#[command(version)]
struct Args {
    /// Address to recode (SS58, base58 or 0x hex)
    address: String,

    /// Address prefix overriding the configured one (-1 for the default)
    #[arg(short, long, allow_hyphen_values = true)]
    prefix: Option<i32>,

    /// Genesis hash of the chain to display the address for
    #[arg(short, long)]
    genesis_hash: Option<String>,

    /// Key type to assume when the address matches no known account
    #[arg(short = 't', long = "type")]
    key_type: Option<KeyType>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&LogTarget::Stderr)?;

    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(prefix) = args.prefix {
        config.settings.prefix = prefix;
    }

    let registry = config.chain_registry();
    let chain = match args.genesis_hash.as_deref() {
        Some(hash) => Some(
            registry
                .resolve(hash)
                .ok_or_else(|| format!("Unknown chain {}", hash))?,
        ),
        None => None,
    };

    let recoded = recode(
        &args.address,
        &config.accounts,
        chain.as_ref(),
        &config.settings,
        args.key_type,
    );

    let Some(formatted) = recoded.formatted.as_deref() else {
        eprintln!("Cannot decode address {}", args.address);
        std::process::exit(1);
    };

    println!("Address:   {}", formatted);
    println!("Prefix:    {}", recoded.prefix);
    println!("Key type:  {}", recoded.key_type);
    if let Some(legacy) = &recoded.legacy_encoding {
        println!("Ğ1v1 key:  {}", legacy);
    }
    if let Some(chain) = &chain {
        println!("Chain:     {}", chain.display_name());
    }
    match recoded.account.as_ref() {
        Some(account) => println!(
            "Account:   {}",
            account.name.as_deref().unwrap_or("<unknown>")
        ),
        None => println!("Account:   not in the wallet"),
    }

    Ok(())
}
