use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use anyhow::{Context as _, Result};
use clap::Args;
use huduma_core::dto::MigrationSummaryDto;
use huduma_core::rules::{normalize_batch, PhoneOutcome};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_PHONE_FIELD: &str = "phone";

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// JSON file holding an array of records
    #[arg(long)]
    pub input: PathBuf,
    /// Where to write the updated records; defaults to rewriting the input
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_PHONE_FIELD)]
    pub field: String,
    #[arg(long)]
    pub dry_run: bool,
}

pub fn migrate(ctx: &Context<'_>, args: MigrateArgs) -> Result<()> {
    let mut records = read_records(&args.input)?;
    let values = phone_values(&records, &args.field)?;
    let report = normalize_batch(values.iter().map(Option::as_deref));

    for change in &report.changes {
        match change.outcome {
            PhoneOutcome::Normalized | PhoneOutcome::Unchanged => {
                if let (Some(canonical), Some(record)) = (
                    &change.canonical,
                    records[change.index].as_object_mut(),
                ) {
                    record.insert(args.field.clone(), Value::String(canonical.clone()));
                }
            }
            PhoneOutcome::Rejected => {
                warn!(
                    index = change.index,
                    value = change.original.as_deref().unwrap_or_default(),
                    "phone number left unchanged"
                );
            }
            PhoneOutcome::Missing => {}
        }
    }

    let summary = MigrationSummaryDto::from_report(&report, args.dry_run);
    debug!(
        total = summary.total,
        normalized = summary.normalized,
        rejected = summary.rejected,
        "migration evaluated"
    );

    if !args.dry_run {
        let target = args.output.as_deref().unwrap_or(&args.input);
        write_records(target, &records)?;
        debug!(path = %target.display(), "records written");
    }

    if ctx.json {
        print_json(&summary)?;
    } else {
        println!(
            "total {}, normalized {}, unchanged {}, rejected {}, missing {}{}",
            summary.total,
            summary.normalized,
            summary.unchanged,
            summary.rejected,
            summary.missing,
            if summary.dry_run { " (dry run)" } else { "" }
        );
        for rejected in &summary.rejected_records {
            println!("rejected #{}: {}", rejected.index, rejected.value);
        }
    }
    Ok(())
}

fn read_records(path: &Path) -> Result<Vec<Value>> {
    if !path.exists() {
        return Err(not_found(format!("input file {}", path.display())));
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read records {}", path.display()))?;
    let parsed: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse records {}", path.display()))?;
    match parsed {
        Value::Array(records) => Ok(records),
        _ => Err(invalid_input("records file must contain a JSON array")),
    }
}

fn phone_values(records: &[Value], field: &str) -> Result<Vec<Option<String>>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let object = record
                .as_object()
                .ok_or_else(|| invalid_input(format!("record #{index} is not an object")))?;
            match object.get(field) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(value)) => Ok(Some(value.clone())),
                Some(Value::Number(value)) => Ok(Some(value.to_string())),
                Some(_) => Err(invalid_input(format!(
                    "record #{index} has a non-text {field} field"
                ))),
            }
        })
        .collect()
}

fn write_records(path: &Path, records: &[Value]) -> Result<()> {
    let mut out = serde_json::to_string_pretty(records)?;
    out.push('\n');
    fs::write(path, out).with_context(|| format!("write records {}", path.display()))
}
