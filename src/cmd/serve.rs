use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};

use vidbridge::addon::server;
use vidbridge::Addon;

use super::{build_client, GlobalOptions};

pub async fn cmd_serve(options: &GlobalOptions, port: Option<u16>, bind: Option<String>) -> Result<()> {
    let mut config = options.load_config()?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bind) = bind {
        config.bind = bind;
    }

    let ip: IpAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind))?;
    let addr = SocketAddr::new(ip, config.port);
    let public_url = config.public_url();

    let (config, client) = build_client(config)?;
    eprintln!("🌐 Target: {}", config.target_url);
    let addon = std::sync::Arc::new(Addon::new(config, client));

    server::serve(addon, addr, &public_url).await
}
