//! Aggregation-pipeline evaluation for the in-memory backend.
//!
//! Only the stages the tests and demos need are implemented: `$match` with
//! top-level field equality, `$limit`, and `$count`. Anything else is
//! reported as a backend error rather than silently ignored.

use bson::{Bson, Document};

use repolayer_core::error::{BackendError, BackendResult};

/// Runs `pipeline` over a materialized snapshot of the collection, stage by
/// stage, producing the derived document sequence.
pub(crate) fn run_pipeline(
    documents: Vec<Document>,
    pipeline: &[Document],
) -> BackendResult<Vec<Document>> {
    let mut current = documents;

    for stage in pipeline {
        if stage.len() != 1 {
            return Err(BackendError::new(
                "aggregation stage must hold exactly one operator",
            ));
        }
        // len() == 1 makes the iterator non-empty
        let (operator, spec) = stage.iter().next().unwrap();

        match operator.as_str() {
            "$match" => {
                let filter = spec
                    .as_document()
                    .ok_or_else(|| BackendError::new("$match expects a document"))?;
                current.retain(|doc| matches_filter(doc, filter));
            }
            "$limit" => {
                let limit = stage_int(spec)
                    .ok_or_else(|| BackendError::new("$limit expects an integer"))?;
                if limit < 0 {
                    return Err(BackendError::new("$limit must be non-negative"));
                }
                current.truncate(limit as usize);
            }
            "$count" => {
                let field = spec
                    .as_str()
                    .ok_or_else(|| BackendError::new("$count expects a field name"))?;
                let mut counted = Document::new();
                counted.insert(field, current.len() as i64);
                current = vec![counted];
            }
            other => {
                return Err(BackendError::new(format!(
                    "unsupported aggregation stage: {other}"
                )));
            }
        }
    }

    Ok(current)
}

/// Top-level field equality, the only `$match` form supported in memory.
fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

fn stage_int(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(n) => Some(i64::from(*n)),
        Bson::Int64(n) => Some(*n),
        _ => None,
    }
}
