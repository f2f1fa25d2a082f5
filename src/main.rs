mod config;
mod handler;
mod http;
mod net;

use config::{ServerConfig, config, set_config};
use net::server::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "config.toml";

#[async_std::main]
async fn main() -> std::io::Result<()> {
    set_config(ServerConfig::load(CONFIG_PATH));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config().log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        address = %config().address,
        port = config().port,
        server_name = %config().server_name,
        "starting mirrornet"
    );

    let server = match Server::bind().await {
        Ok(server) => server,
        Err(err) => {
            error!(%err, port = config().port, "failed to bind listener");
            return Err(err);
        }
    };

    server.run().await
}
