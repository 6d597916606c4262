//! Command handlers.
//!
//! Each handler takes resolved configuration and returns the text to print, so `main` only
//! has to dispatch and write to stdout.

use anyhow::Context;
use case_core::{CaseRecord, ChangeLog, DynamicField, StaticField};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::config::{CliConfig, OutputFormat};
use crate::demo;

/// One step of a replay file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateStep {
    field: String,
    value: Value,
}

pub fn demo(cfg: &CliConfig) -> anyhow::Result<String> {
    let record = demo::run_demo()?;
    render_record(&record, cfg.output_format())
}

pub fn show(cfg: &CliConfig, case_file: &Path) -> anyhow::Result<String> {
    let record = load_case(case_file)?;
    render_record(&record, cfg.output_format())
}

/// Apply a single update and render the resulting record.
///
/// `raw_value` is parsed as JSON; anything that is not valid JSON is taken as a plain string.
pub fn update(
    cfg: &CliConfig,
    case_file: &Path,
    field: &str,
    raw_value: &str,
) -> anyhow::Result<String> {
    let mut record = load_case(case_file)?;
    record
        .update_dynamic_data(field, parse_value(raw_value))
        .with_context(|| format!("failed to update {field}"))?;
    render_record(&record, cfg.output_format())
}

/// Apply every step of `updates_file` in order and render the change log.
///
/// Stops at the first step that fails.
pub fn replay(cfg: &CliConfig, case_file: &Path, updates_file: &Path) -> anyhow::Result<String> {
    let mut record = load_case(case_file)?;

    let text = std::fs::read_to_string(updates_file)
        .with_context(|| format!("failed to read {}", updates_file.display()))?;
    let steps: Vec<UpdateStep> = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse updates in {}", updates_file.display()))?;

    for (index, step) in steps.into_iter().enumerate() {
        record
            .update_dynamic_data(&step.field, step.value)
            .with_context(|| format!("update #{} ({}) failed", index + 1, step.field))?;
    }

    render_log(record.log(), cfg.output_format())
}

pub fn fields() -> String {
    let mut out = String::from("Dynamic (updatable):\n");
    for field in DynamicField::ALL {
        let note = if field.is_append_only() {
            " (append-only)"
        } else {
            ""
        };
        out.push_str(&format!("  {field}{note}\n"));
    }
    out.push_str("Static:\n");
    for field in StaticField::ALL {
        out.push_str(&format!("  {field}\n"));
    }
    out
}

fn load_case(path: &Path) -> anyhow::Result<CaseRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let record = if is_json {
        CaseRecord::from_json(&text)
    } else {
        CaseRecord::from_yaml(&text)
    };
    record.with_context(|| format!("invalid case document {}", path.display()))
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn render_record(record: &CaseRecord, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => record.to_yaml(),
        OutputFormat::Json => record.to_json(),
    };
    Ok(rendered?)
}

fn render_log(log: &ChangeLog, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(log)?,
        OutputFormat::Json => serde_json::to_string_pretty(log)?,
    };
    Ok(rendered)
}
