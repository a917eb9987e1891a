use anyhow::Context;
use cosmo_kernel::prelude::load_config;
use cosmo_logger::Logger;
use cosmo_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg = load_config(Some("server")).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build()?.run().await
}
