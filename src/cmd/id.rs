use anyhow::Result;

use vidbridge::id;

pub fn cmd_encode(url: &str) -> Result<()> {
    println!("{}", id::encode(url)?);
    Ok(())
}

pub fn cmd_decode(item_id: &str) -> Result<()> {
    println!("{}", id::decode(item_id)?);
    Ok(())
}
