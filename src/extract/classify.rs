//! Workflow classification
//!
//! Three independent verdicts on a file's content: it parses as YAML, it
//! looks like a workflow, and it validates against the GitHub Actions
//! workflow schema. None of them ever fails the extraction.

use std::sync::LazyLock;

use jsonschema::{Draft, JSONSchema};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::yaml;
use crate::model::Validity;

/// Draft-07 schema of GitHub Actions workflow files
const WORKFLOW_SCHEMA_SOURCE: &str = include_str!("../../schemas/github-workflow.json");

/// `on:` as a mapping key at the start of a line, optionally quoted.
/// A leading byte order mark counts as the start of the line.
static ON_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\x{FEFF}?[ \t]*["']?on["']?[ \t]*:"#).expect("Invalid on key regex")
});

/// `jobs:` as a mapping key at the start of a line, optionally quoted
static JOBS_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\x{FEFF}?[ \t]*["']?jobs["']?[ \t]*:"#).expect("Invalid jobs key regex")
});

static WORKFLOW_SCHEMA: LazyLock<JSONSchema> = LazyLock::new(|| {
    let schema: Value =
        serde_json::from_str(WORKFLOW_SCHEMA_SOURCE).expect("Invalid workflow schema JSON");
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Invalid workflow schema")
});

/// Whether the text mentions both an `on` and a `jobs` key
///
/// A plain text check, so it also answers for content that is not YAML.
pub fn is_probable_workflow(text: &str) -> bool {
    ON_KEY_REGEX.is_match(text) && JOBS_KEY_REGEX.is_match(text)
}

/// Parse the text as a single YAML document
pub fn parse_yaml(text: &str) -> Option<Value> {
    match yaml::load(text) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Content is not valid YAML: {}", e);
            None
        }
    }
}

/// Whether a parsed document validates against the workflow schema
pub fn is_valid_workflow(document: &Value) -> bool {
    WORKFLOW_SCHEMA.is_valid(document)
}

/// Classify textual content
pub fn classify(text: &str) -> Validity {
    let document = parse_yaml(text);
    Validity {
        valid_yaml: document.is_some(),
        probably_workflow: is_probable_workflow(text),
        valid_workflow: document.as_ref().is_some_and(is_valid_workflow),
    }
}

/// Classify raw blob content
///
/// Bytes that are not UTF-8 are never YAML; the workflow heuristic still
/// runs on a lossy decoding.
pub fn classify_bytes(bytes: &[u8]) -> Validity {
    match std::str::from_utf8(bytes) {
        Ok(text) => classify(text),
        Err(_) => Validity {
            probably_workflow: is_probable_workflow(&String::from_utf8_lossy(bytes)),
            ..Validity::default()
        },
    }
}
