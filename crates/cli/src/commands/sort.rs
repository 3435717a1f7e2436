//! Print the order in which the items of a set get equipped.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use wheel_core::fortune_items_sort;
use wheel_sandbox::PermissionRules;

use super::ContentArgs;
use crate::config::CliConfig;

/// Print the equip order of an item set
#[derive(Parser)]
pub struct Sort {
    /// Name of the item set (display name or preset key, e.g. "maid")
    #[arg(value_name = "SET")]
    set: String,

    #[command(flatten)]
    content: ContentArgs,
}

impl Sort {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let sandbox = self.content.sandbox(config, PermissionRules::default())?;
        let loaded = self.content.character(config)?;
        let character = &loaded.character;

        let set = sandbox.find_set(character, &self.set)?;
        let env = sandbox.host().as_host_env();
        let sorted = fortune_items_sort(set.items(), character, &env)
            .with_context(|| format!("Failed to sort item set '{}'", set.name()))?;

        println!(
            "{} {}",
            style("Item Set:").bold().cyan(),
            set.name()
        );
        for (position, item) in sorted.iter().enumerate() {
            println!("  {:>2}. {}/{}", position + 1, item.group, item.name);
        }

        Ok(())
    }
}
