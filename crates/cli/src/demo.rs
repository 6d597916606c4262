//! Bundled demonstration case.
//!
//! A 60-year-old man presenting with crushing substernal chest pain, examined twice: once on
//! arrival and once after initial stabilisation.

use case_core::{CaseRecord, Findings};

/// The bundled case document.
pub const CHEST_PAIN_CASE: &str = include_str!("../cases/chest_pain.yaml");

fn findings(entries: &[(&str, &str)]) -> Findings {
    entries
        .iter()
        .map(|(system, text)| (system.to_string(), text.to_string()))
        .collect()
}

fn arrival_exam() -> Findings {
    findings(&[
        ("GENERAL", "A&OX3, moderate distress"),
        ("HEENT", "PERRL/EOMI"),
        ("NECK", "Supple, no JVD"),
        ("CV", "2/6 systolic apical murmur, tachycardia"),
        ("PULM", "Diffuse rales all lung fields"),
        ("ABD", "Soft, NT/ND, + BS"),
        ("EXT", "No C/C/E, palpable pulses all extremities"),
        ("NEURO", "WNL, MAE X 4, grossly intact"),
    ])
}

fn reassessment_exam() -> Findings {
    findings(&[
        ("GENERAL", "A&OX3, mild distress"),
        ("HEENT", "PERRL/EOMI"),
        ("NECK", "Supple, no JVD"),
        ("CV", "1/6 systolic apical murmur, regular rhythm"),
        ("PULM", "Clear to auscultation bilaterally"),
        ("ABD", "Soft, NT/ND, + BS"),
        ("EXT", "No C/C/E, palpable pulses all extremities"),
        ("NEURO", "WNL, MAE X 4, grossly intact"),
    ])
}

/// Builds the bundled case and records both physical exams.
pub fn run_demo() -> anyhow::Result<CaseRecord> {
    let mut record = CaseRecord::from_yaml(CHEST_PAIN_CASE)?;
    record.record_physical_exam(arrival_exam())?;
    record.record_physical_exam(reassessment_exam())?;
    tracing::info!(
        exams = record.physical_exam().len(),
        log_entries = record.log().len(),
        "demo case ready"
    );
    Ok(record)
}
