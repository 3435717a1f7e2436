//! Equip an item set (or a wheel option) on a character.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use wheel_content::CharacterLoader;
use wheel_core::{EquipReport, HookOutcome, LockFlag};
use wheel_sandbox::PermissionRules;

use super::ContentArgs;
use crate::config::CliConfig;

/// Equip an item set on a character
#[derive(Parser)]
pub struct Equip {
    /// Name of the item set (display name or preset key, e.g. "maid")
    #[arg(value_name = "SET", required_unless_present = "option")]
    set: Option<String>,

    /// Wheel option ID instead of a set name (see `wheel options`)
    #[arg(short, long, value_name = "ID", conflicts_with_all = ["set", "flag"])]
    option: Option<u32>,

    #[command(flatten)]
    content: ContentArgs,

    /// Lock applied to every equipped item
    #[arg(short, long, value_enum)]
    flag: Option<FlagArg>,

    /// Room categories that are not allowed (repeatable)
    #[arg(long = "ban-category", value_name = "CATEGORY")]
    banned_categories: Vec<String>,

    /// Write the resulting character back to its file
    #[arg(long)]
    save: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum FlagArg {
    Exclusive,
    Timer5,
    Timer15,
    Timer60,
    Timer240,
    HighSecurity,
    None,
}

impl From<FlagArg> for LockFlag {
    fn from(flag: FlagArg) -> Self {
        match flag {
            FlagArg::Exclusive => LockFlag::Exclusive,
            FlagArg::Timer5 => LockFlag::Timer { seconds: 5 * 60 },
            FlagArg::Timer15 => LockFlag::Timer { seconds: 15 * 60 },
            FlagArg::Timer60 => LockFlag::Timer { seconds: 60 * 60 },
            FlagArg::Timer240 => LockFlag::Timer { seconds: 240 * 60 },
            FlagArg::HighSecurity => LockFlag::HighSecurity,
            FlagArg::None => LockFlag::None,
        }
    }
}

impl Equip {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let rules = self
            .banned_categories
            .iter()
            .fold(PermissionRules::new(), |rules, category| {
                rules.ban_category(category.as_str())
            });
        let sandbox = self.content.sandbox(config, rules)?;
        let mut loaded = self.content.character(config)?;

        let report = match (self.option, &self.set) {
            (Some(id), _) => sandbox.equip_option(id, &mut loaded.character)?,
            (None, Some(name)) => {
                let set = sandbox.find_set(&loaded.character, name)?;
                sandbox.equip(&set, &mut loaded.character, self.flag.map(LockFlag::from))?
            }
            (None, None) => anyhow::bail!("Either a set name or --option is required"),
        };

        print_report(&report);

        if self.save {
            CharacterLoader::save(&loaded.path, &loaded.character)
                .with_context(|| format!("Failed to save character: {}", loaded.path.display()))?;
            println!();
            println!(
                "{} {}",
                style("Saved:").bold().cyan(),
                loaded.path.display()
            );
        }

        Ok(())
    }
}

fn print_report(report: &EquipReport) {
    println!("{} {}", style("Item Set:").bold().cyan(), report.label);
    println!();

    if report.aborted_enclosed {
        println!(
            "{}",
            style("Enclosed in a locked item; nothing was changed.").bold().red()
        );
        return;
    }

    if !report.stripped.is_empty() {
        println!("{}", style("Stripped:").bold().yellow());
        for item in &report.stripped {
            println!("  {}/{}", item.group, item.asset);
        }
        println!();
    }

    if !report.removed.is_empty() {
        println!("{}", style("Removed:").bold().yellow());
        for item in &report.removed {
            println!("  {}/{}", item.group, item.asset);
        }
        println!();
    }

    println!("{}", style("Equipped:").bold().yellow());
    if report.equipped.is_empty() {
        println!("  {}", style("(nothing)").dim());
    }
    for group in &report.equipped {
        println!("  {}", group);
    }

    if !report.suppressed.is_empty() {
        println!();
        println!("{}", style("Skipped:").bold().yellow());
        for group in &report.suppressed {
            println!("  {}", style(group).dim());
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Failures:").bold().red());
        for (_, entry) in report.failures.iter() {
            let reasons: Vec<String> = entry.reasons.iter().map(ToString::to_string).collect();
            println!(
                "  {} ({}/{}): {}",
                entry.description,
                entry.group,
                entry.asset,
                reasons.join(", ")
            );
        }
    }

    let hook_errors: Vec<_> = report.hooks.errors().collect();
    if !hook_errors.is_empty() {
        println!();
        println!("{}", style("Hook errors:").bold().red());
        for entry in hook_errors {
            if let HookOutcome::Failed(reason) = &entry.outcome {
                println!("  {}-{}-{}: {}", entry.owner, entry.kind, entry.name, reason);
            }
        }
    }

    println!();
    if report.is_complete() {
        println!("{}", style("Done.").bold().green());
    } else {
        println!("{}", style("Done with failures.").bold().yellow());
    }
}
