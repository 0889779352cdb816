use anyhow::Result;
use tracing::info;

use corvus_uci::UciEngine;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("corvus starting");
    UciEngine::new().run()?;
    Ok(())
}
