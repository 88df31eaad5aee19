//! CLI Status Command
//!
//! Prints the same payload the `somark_sync.status` gateway method returns.

use anyhow::Result;

use somark_plugins::SomarkSyncPlugin;

pub fn run(plugin: &SomarkSyncPlugin) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&plugin.status())?);
    Ok(())
}
