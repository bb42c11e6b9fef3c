//! Turns session reports into terminal output.

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use session::{Notice, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured banners and plain result lines
    Text,
    /// One pretty-printed JSON report per invocation or session command
    Json,
}

pub fn render(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for notice in &report.notices {
                println!("{}", format_notice(notice));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn format_notice(notice: &Notice) -> String {
    match notice {
        Notice::Success(text) => format!("{} {}", "✓".green(), text),
        Notice::Warning(text) => format!("{} {}", "!".yellow(), text.yellow()),
        Notice::Error(text) => format!("{} {}", "✗".red(), text.red()),
        Notice::Heading(text) => format!("{}", text.bold().blue()),
        Notice::Line(text) => format!("  {}", text),
    }
}
