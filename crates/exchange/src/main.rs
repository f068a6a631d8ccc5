use hexdex_exchange::{Exchange, ExchangeConfig};
use log::info;

fn print_help() {
    eprintln!(
        r#"HexDex - in-memory multi-asset exchange

USAGE:
    hexdex <CONFIG>

Loads the JSON configuration, lists its assets, funds its accounts,
places its seed orders and prints the resulting books and balances.

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let path = match args.get(1).map(String::as_str) {
        Some("--help") | Some("-h") => {
            print_help();
            return Ok(());
        }
        Some(path) if args.len() == 2 => path.to_string(),
        _ => {
            print_help();
            std::process::exit(1);
        }
    };

    info!("Loading configuration from: {}", path);
    let config = ExchangeConfig::from_file(&path)?;
    info!("Base asset: {}", config.base_asset);
    info!("Settlement policy: {:?}", config.settlement_policy);

    let exchange = Exchange::from_config(&config)?;
    let snapshot = exchange.snapshot().await;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
