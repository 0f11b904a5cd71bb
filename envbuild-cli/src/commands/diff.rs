//! `envbuild diff` — show what `build` would change in `.env`.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use envbuild_sync::diff_env;

use super::TargetArgs;

/// Arguments for `envbuild diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

impl DiffArgs {
    pub async fn run(self) -> Result<()> {
        let settings = self.target.settings()?;
        let store = self.target.store().await;

        let result = diff_env(&settings, &store)
            .await
            .with_context(|| format!("diff failed for '{}'", settings.environment))?;

        match result.unified_diff {
            None => println!("No differences for {}.", result.output_path.display()),
            Some(diff) => {
                for line in diff.lines() {
                    if line.starts_with("+++") || line.starts_with("---") {
                        println!("{}", line.bold());
                    } else if line.starts_with('+') {
                        println!("{}", line.green());
                    } else if line.starts_with('-') {
                        println!("{}", line.red());
                    } else {
                        println!("{line}");
                    }
                }
            }
        }

        if !result.unresolved.is_empty() {
            println!(
                "{} unresolved tokens: {}",
                "!".yellow(),
                result.unresolved.join(", ")
            );
        }
        Ok(())
    }
}
