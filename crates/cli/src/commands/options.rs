//! List wheel options and their IDs.

use anyhow::Result;
use clap::Parser;
use console::style;
use wheel_sandbox::PermissionRules;

use super::ContentArgs;
use crate::config::CliConfig;

/// List wheel options with their IDs
#[derive(Parser)]
pub struct Options {
    #[command(flatten)]
    content: ContentArgs,

    /// Only list options enabled by default
    #[arg(long)]
    defaults_only: bool,
}

impl Options {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let sandbox = self.content.sandbox(config, PermissionRules::default())?;
        let loaded = self.content.character(config)?;

        let options = sandbox.wheel_options(&loaded.character)?;
        println!("{}", style("=== Wheel Options ===").bold().green());
        for option in options
            .iter()
            .filter(|option| option.default || !self.defaults_only)
        {
            let source = if option.custom { "custom" } else { "built-in" };
            let marker = if option.default {
                style("*").green().to_string()
            } else {
                " ".to_string()
            };
            println!(
                "{} {:>5}  {}  {}  {}",
                marker,
                style(option.id).cyan(),
                option.description,
                style(source).dim(),
                style(format!("x{}", option.weight)).dim()
            );
        }

        let slots = sandbox.weighted_wheel(&loaded.character)?;
        println!();
        println!("{} {}", style("Wheel slots:").bold(), slots.len());

        Ok(())
    }
}
