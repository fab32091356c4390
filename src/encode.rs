use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{RuleCategory, RuleSet};

/// Version string stamped into every canonical JSON artifact
pub const CANONICAL_VERSION: &str = "1.0.0";

/// One rule object of the canonical JSON form, every list
/// lexicographically sorted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalRule {
    pub domain: Vec<String>,
    pub domain_suffix: Vec<String>,
    pub domain_keyword: Vec<String>,
}

/// Canonical JSON document: `{"version": "...", "rules": [...]}` with
/// stable key ordering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalDocument {
    pub version: String,
    pub rules: Vec<CanonicalRule>,
}

impl CanonicalDocument {
    /// Build the canonical document for a rule set.
    pub fn from_rule_set(set: &RuleSet) -> Self {
        Self {
            version: CANONICAL_VERSION.to_string(),
            rules: vec![CanonicalRule {
                domain: sorted(&set.domain),
                domain_suffix: sorted(&set.domain_suffix),
                domain_keyword: sorted(&set.domain_keyword),
            }],
        }
    }
}

/// Encode a rule set to the canonical pretty-printed JSON form.
pub fn canonical_json(set: &RuleSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(
        &CanonicalDocument::from_rule_set(set),
    )?)
}

/// Encode a rule set to the derived line-oriented form: suffix entries,
/// then domain entries, then keyword entries, one `PREFIX,value` line
/// each, newline-joined with no trailing newline.
pub fn line_document(set: &RuleSet) -> String {
    let order = [
        RuleCategory::DomainSuffix,
        RuleCategory::Domain,
        RuleCategory::DomainKeyword,
    ];

    let mut lines = Vec::with_capacity(set.len());
    for category in order {
        for value in sorted(set.category(category)) {
            lines.push(format!("{},{}", category.line_prefix(), value));
        }
    }
    lines.join("\n")
}

/// Write both artifacts for a group: `<name>.json` (canonical form) and
/// `<name>.srs` (derived line form). Returns the JSON artifact's path.
pub fn write_artifacts(dir: impl AsRef<Path>, name: &str, set: &RuleSet) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let json_path = dir.join(format!("{name}.json"));
    fs::write(&json_path, canonical_json(set)?)?;
    fs::write(dir.join(format!("{name}.srs")), line_document(set))?;

    Ok(json_path)
}

fn sorted(entries: &HashSet<String>) -> Vec<String> {
    let mut values: Vec<String> = entries.iter().cloned().collect();
    values.sort();
    values
}
