// ============================================================
// Layer 4 — Submission Writer
// ============================================================
// The submission template has the same rows, in the same
// order, as the test table: an id column followed by the six
// label columns. We keep the ids, replace the label columns
// with the predicted probabilities, and write the result to a
// new file. A row-count mismatch between template and
// predictions aborts the run.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::domain::record::{LABELS, LABEL_COUNT};

#[derive(Debug, Deserialize)]
struct TemplateRow {
    id: String,
}

/// Read the id column of the submission template, preserving
/// row order.
pub fn load_template_ids(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;

    let mut ids = Vec::new();
    for row in reader.deserialize::<TemplateRow>() {
        let row = row.with_context(|| format!("Malformed row in '{}'", path.display()))?;
        ids.push(row.id);
    }
    Ok(ids)
}

/// Write the submission file: one row per template id, label
/// columns overwritten with the predicted probabilities.
pub fn write_submission(
    path: &Path,
    ids: &[String],
    predictions: &[[f32; LABEL_COUNT]],
) -> Result<()> {
    if ids.len() != predictions.len() {
        bail!(
            "Prediction shape mismatch: template has {} rows, model produced {}",
            ids.len(),
            predictions.len(),
        );
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot write '{}'", path.display()))?;

    let mut header = vec!["id"];
    header.extend_from_slice(&LABELS);
    writer.write_record(&header)?;

    for (id, probs) in ids.iter().zip(predictions) {
        let mut row = vec![id.clone()];
        row.extend(probs.iter().map(|p| p.to_string()));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    tracing::info!("Wrote {} predictions to '{}'", ids.len(), path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_round_trip_preserves_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("sample_submission.csv");
        let mut f = std::fs::File::create(&template).unwrap();
        writeln!(f, "id,toxic,severe_toxic,obscene,threat,insult,identity_hate").unwrap();
        writeln!(f, "x1,0.5,0.5,0.5,0.5,0.5,0.5").unwrap();
        writeln!(f, "x2,0.5,0.5,0.5,0.5,0.5,0.5").unwrap();

        let ids = load_template_ids(&template).unwrap();
        assert_eq!(ids, vec!["x1".to_string(), "x2".to_string()]);

        let preds = vec![[0.9f32; LABEL_COUNT], [0.1f32; LABEL_COUNT]];
        let out = dir.path().join("submission.csv");
        write_submission(&out, &ids, &preds).unwrap();

        let written = load_template_ids(&out).unwrap();
        assert_eq!(written, ids);

        let content = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].starts_with("id,toxic,"));
        assert!(lines[1].starts_with("x1,0.9"));
        assert!(lines[2].starts_with("x2,0.1"));
    }

    #[test]
    fn test_row_count_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("submission.csv");
        let ids = vec!["x1".to_string(), "x2".to_string()];
        let preds = vec![[0.5f32; LABEL_COUNT]];
        assert!(write_submission(&out, &ids, &preds).is_err());
    }
}
