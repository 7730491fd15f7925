use anyhow::Result;

use vidbridge::catalog::PageRequest;
use vidbridge::CatalogExtractor;

use super::{build_client, GlobalOptions};

pub async fn cmd_catalog(options: &GlobalOptions, skip: u32, search: Option<&str>) -> Result<()> {
    let (config, client) = build_client(options.load_config()?)?;
    let catalog = CatalogExtractor::new(config.clone(), client);

    let request = PageRequest::new(skip, search);
    eprintln!(
        "📄 Page {} of {}{}",
        request.page(config.items_per_page),
        config.target_url,
        request
            .query
            .as_deref()
            .map(|q| format!(" (search: {q})"))
            .unwrap_or_default()
    );

    // The CLI wants to see failures, unlike the add-on routes.
    let entries = catalog.try_list(&request).await?;
    eprintln!("✅ {} entries", entries.len());
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
