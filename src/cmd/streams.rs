use anyhow::Result;

use vidbridge::addon::{Addon, ItemRequest};

use super::{build_client, GlobalOptions};

pub async fn cmd_streams(options: &GlobalOptions, id: &str) -> Result<()> {
    let (config, client) = build_client(options.load_config()?)?;
    let addon = Addon::new(config, client);

    let response = addon
        .stream(&ItemRequest {
            media_kind: "movie".to_string(),
            item_id: id.to_string(),
        })
        .await;

    if response.streams.is_empty() {
        eprintln!("⚠️  No streams found");
    } else {
        eprintln!("🎬 {} stream(s)", response.streams.len());
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
