use anyhow::Result;
use clap::Parser;
use glamour_voice::{logger, AppConfig, Launcher};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenv::dotenv().ok();
    logger::init();

    let cfg = AppConfig::parse();
    info!(version = glamour_voice::VERSION, bind = %cfg.web_bind, "starting");

    Launcher::new(cfg).launch().await
}
