use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use chain_window::{
    shorten_address, AlloyChainProvider, Config, LogNotifier, SessionSettings,
    TransferForm, TransferForwarderClient, WalletSession,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration first
    let config_path = std::env::var("CHAIN_WINDOW_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::load_from(&config_path)?;

    // Initialize logging with configured level
    let log_level = config.service.log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Configuration loaded from {}", config_path);

    let provider = Arc::new(AlloyChainProvider::new(&config.chain, config.private_key())?);
    provider.verify_chain_id(config.chain.chain_id).await?;

    let contract_address = config.contract_address()?;
    let contract = TransferForwarderClient::new(provider.provider(), contract_address);
    info!("Transfer contract: {}", shorten_address(Some(&contract.contract_address().to_string())));

    let settings = SessionSettings {
        max_depth: config.window.max_depth,
        unit: config.unit()?,
        symbol: config.window.symbol.clone(),
    };
    let mut session = WalletSession::new(provider, contract, LogNotifier, settings);

    let address = session.connect_wallet().await?;
    info!(
        "Account {} balance: {} {}",
        shorten_address(Some(&address.to_string())),
        session.state().wallet_balance.as_deref().unwrap_or("N/A"),
        config.window.symbol
    );

    // Optional transfer, e.g. TRANSFER_TO=0x... TRANSFER_AMOUNT=0.1
    match (std::env::var("TRANSFER_TO"), std::env::var("TRANSFER_AMOUNT")) {
        (Ok(to), Ok(amount)) => {
            let mut form = TransferForm::new(to, amount);
            let receipt = session.send_transfer(&mut form).await?;
            info!("Transfer receipt: {:?}", receipt);
        }
        (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
            warn!("Both TRANSFER_TO and TRANSFER_AMOUNT are required to send a transfer");
        }
        _ => {}
    }

    let window = session.window();
    info!(
        "Window holds {} blocks with {} transactions",
        window.len(),
        window.transaction_count()
    );
    println!("{}", serde_json::to_string_pretty(window)?);

    Ok(())
}
