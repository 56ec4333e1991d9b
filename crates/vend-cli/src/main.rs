//! # vend-kiosk
//!
//! Luna's Vending Machine on the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Optional settings
//! export KIOSK_CATALOG=config/catalog.toml
//! export KIOSK_DEFAULT_STOCK=10
//! export KIOSK_LANGUAGE=arabic
//! export KIOSK_LOG_FORMAT=json
//! export RUST_LOG=info
//!
//! # Run the kiosk (logs go to stderr)
//! vend-kiosk
//! ```

use anyhow::Context;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vend_cli::{AppConfig, Console, LogFormat, Session};
use vend_core::LocalizationTable;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    // stdout belongs to the buyer
    init_tracing(config.log_format);

    info!("vend-kiosk {}", env!("CARGO_PKG_VERSION"));

    let catalog = config.load_catalog()?;
    let table = Arc::new(LocalizationTable::builtin());

    let mut session = Session::new(Console::stdio(), table, catalog)
        .context("Failed to initialize the catalog")?;
    let summary = session.run(config.preselected_language())?;

    for sale in &summary.sales {
        info!(
            sale_id = %sale.id,
            code = %sale.code,
            price = %sale.price,
            add_on = sale.add_on,
            sold_at = %sale.sold_at,
            "Sale"
        );
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Plain => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }
}
