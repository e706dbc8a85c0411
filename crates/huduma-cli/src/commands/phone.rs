use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use huduma_core::domain::{format_phone_display, normalize_phone};
use huduma_core::dto::{PhoneReportDto, ValidationReportDto};
use tracing::debug;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[arg(required = true, value_name = "PHONE")]
    pub phones: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(value_name = "PHONE")]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    #[arg(value_name = "PHONE")]
    pub phone: String,
}

pub fn normalize(ctx: &Context<'_>, args: NormalizeArgs) -> Result<()> {
    let reports: Vec<PhoneReportDto> = args
        .phones
        .iter()
        .map(|raw| PhoneReportDto::from_input(raw))
        .collect();

    if ctx.json {
        print_json(&reports)?;
    } else {
        for report in &reports {
            if let Some(canonical) = &report.canonical {
                println!("{}", canonical);
            }
        }
    }

    let rejected: Vec<&str> = reports
        .iter()
        .filter(|report| report.canonical.is_none())
        .map(|report| report.input.as_str())
        .collect();
    if !rejected.is_empty() {
        debug!(count = rejected.len(), "phone numbers rejected");
        return Err(invalid_input(format!(
            "could not normalize phone number(s): {}",
            rejected.join(", ")
        )));
    }
    Ok(())
}

pub fn validate(ctx: &Context<'_>, args: ValidateArgs) -> Result<()> {
    let policy = ctx.config.phone.validation;
    let report = ValidationReportDto::evaluate(&args.phone, policy);
    debug!(
        policy = policy.as_str(),
        strict = report.strict,
        permissive = report.permissive,
        "phone validated"
    );

    if ctx.json {
        print_json(&report)?;
    } else {
        println!(
            "{} ({}: strict={}, permissive={})",
            if report.valid { "valid" } else { "invalid" },
            policy.as_str(),
            report.strict,
            report.permissive
        );
    }

    if !report.valid {
        return Err(invalid_input(format!(
            "phone number fails {} validation: {}",
            policy.as_str(),
            args.phone
        )));
    }
    Ok(())
}

pub fn display(ctx: &Context<'_>, args: DisplayArgs) -> Result<()> {
    let canonical = normalize_phone(Some(&args.phone));
    let rendered = if canonical.is_empty() {
        format_phone_display(&args.phone)
    } else {
        format_phone_display(&canonical)
    };

    if ctx.json {
        print_json(&serde_json::json!({
            "input": args.phone,
            "display": rendered,
        }))?;
    } else {
        println!("{}", rendered);
    }
    Ok(())
}
