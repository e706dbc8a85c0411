use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use huduma_core::time::{format_display_date, parse_display_date};

#[derive(Debug, Args)]
pub struct FormatDateArgs {
    /// RFC 3339 timestamp, YYYY-MM-DD, or YYYY-MM-DD HH:MM
    pub date: String,
    /// chrono format string; defaults to the configured date_format
    #[arg(long)]
    pub format: Option<String>,
}

pub fn format_date(ctx: &Context<'_>, args: FormatDateArgs) -> Result<()> {
    let parsed = parse_display_date(&args.date)?;
    let format = args.format.as_deref().unwrap_or(&ctx.config.date_format);
    let rendered =
        format_display_date(&parsed, format).with_context(|| format!("format {}", args.date))?;

    if ctx.json {
        print_json(&serde_json::json!({
            "input": args.date,
            "display": rendered,
        }))?;
    } else {
        println!("{}", rendered);
    }
    Ok(())
}
