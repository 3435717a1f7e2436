//! List the item sets a character can spin.

use anyhow::Result;
use clap::Parser;
use console::style;
use wheel_core::ItemSet;
use wheel_sandbox::PermissionRules;

use super::ContentArgs;
use crate::config::CliConfig;

/// List built-in and custom item sets
#[derive(Parser)]
pub struct Presets {
    #[command(flatten)]
    content: ContentArgs,

    /// Also list the items of every set
    #[arg(short, long)]
    verbose: bool,
}

impl Presets {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let sandbox = self.content.sandbox(config, PermissionRules::default())?;
        let loaded = self.content.character(config)?;
        let character = &loaded.character;

        println!(
            "{} {}",
            style("Character:").bold().cyan(),
            character.name
        );
        println!();

        println!("{}", style("Built-in sets:").bold().yellow());
        for set in sandbox.builtin_sets(character)? {
            print_set(&set, self.verbose);
        }
        println!();

        println!("{}", style("Custom sets:").bold().yellow());
        if sandbox.custom_sets().is_empty() {
            println!("  {}", style("(none)").dim());
        }
        for (slot, set) in sandbox.custom_sets().iter() {
            print!("  [{}]", slot);
            print_set(set, self.verbose);
        }

        Ok(())
    }
}

fn print_set(set: &ItemSet, verbose: bool) {
    let hidden = if set.is_hidden() {
        style(" (hidden)").dim().to_string()
    } else {
        String::new()
    };
    println!(
        "  {}{} - {} items, strip {}, equip {}",
        style(set.name()).bold(),
        hidden,
        set.items().len(),
        set.strip_level(),
        set.equip_level()
    );
    if verbose {
        for item in set.items() {
            let type_name = item
                .type_name
                .as_deref()
                .map(|name| format!(" [{}]", name))
                .unwrap_or_default();
            println!("      {}/{}{}", item.group, item.name, type_name);
        }
    }
}
