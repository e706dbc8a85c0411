use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use huduma_core::domain::{normalize_status_key, BadgeStatus};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct StatusArgs {
    pub status: String,
}

#[derive(Debug, Serialize)]
struct StatusBadgeDto {
    status: String,
    known: bool,
    class: String,
}

pub fn status(ctx: &Context<'_>, args: StatusArgs) -> Result<()> {
    let styles = &ctx.config.status;
    let class = styles.resolve(&args.status).to_string();
    let known = normalize_status_key(&args.status)
        .map(|key| styles.overrides().contains_key(&key) || BadgeStatus::parse(&key).is_some())
        .unwrap_or(false);

    if ctx.json {
        print_json(&StatusBadgeDto {
            status: args.status,
            known,
            class,
        })?;
    } else {
        println!("{}", class);
    }
    Ok(())
}
