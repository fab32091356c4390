use crate::types::{FieldValue, RawDocument, RuleCategory, RuleSet};

/// Convert an intermediate rule document into the canonical
/// three-category rule set.
///
/// Each category is de-duplicated on its own (set semantics); categories
/// are not yet cross-checked against each other, that is
/// [`merge`](crate::merge::merge)'s job. An empty document yields an
/// empty rule set, a normal outcome.
pub fn normalize(doc: &RawDocument) -> RuleSet {
    let mut set = RuleSet::new();
    match doc {
        RawDocument::Records(records) => {
            for record in records {
                for category in RuleCategory::ALL {
                    match record.field(category) {
                        Some(FieldValue::Single(value)) => insert_value(&mut set, category, value),
                        Some(FieldValue::Many(values)) => {
                            for value in values {
                                insert_value(&mut set, category, value);
                            }
                        }
                        None => {}
                    }
                }
            }
        }
        RawDocument::Payload(lines) => {
            for line in lines {
                // Split on the first comma; the prefix selects the
                // category, the remainder is the pattern value, kept
                // verbatim. Unrecognized prefixes are dropped.
                let Some((prefix, value)) = line.split_once(',') else {
                    continue;
                };
                let Some(category) = RuleCategory::from_line_prefix(prefix) else {
                    continue;
                };
                insert_value(&mut set, category, value);
            }
        }
    }
    set
}

fn insert_value(set: &mut RuleSet, category: RuleCategory, value: &str) {
    // Empty pattern values match nothing useful and are dropped.
    if !value.is_empty() {
        set.insert(category, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(lines: &[&str]) -> RawDocument {
        RawDocument::Payload(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn test_normalize_payload_lines() {
        let doc = payload(&["DOMAIN,x.com", "DOMAIN-SUFFIX,y.com", "DOMAIN-KEYWORD,ads"]);
        let set = normalize(&doc);
        assert!(set.domain.contains("x.com"));
        assert!(set.domain_suffix.contains("y.com"));
        assert!(set.domain_keyword.contains("ads"));
    }

    #[test]
    fn test_normalize_drops_unrecognized_prefixes() {
        let doc = payload(&[
            "DOMAIN,x.com",
            "IP-CIDR,10.0.0.0/8",
            "domain,lower.com",
            "no-comma-line",
        ]);
        let set = normalize(&doc);
        assert_eq!(set.len(), 1);
        assert!(set.domain.contains("x.com"));
    }

    #[test]
    fn test_normalize_keeps_value_verbatim() {
        // Only the first comma splits; the rest of the line is the value.
        let doc = payload(&["DOMAIN, spaced.com", "DOMAIN-KEYWORD,a,b"]);
        let set = normalize(&doc);
        assert!(set.domain.contains(" spaced.com"));
        assert!(set.domain_keyword.contains("a,b"));
    }

    #[test]
    fn test_normalize_drops_empty_values() {
        let doc = payload(&["DOMAIN,", "DOMAIN-SUFFIX,y.com"]);
        let set = normalize(&doc);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_normalize_records() {
        let mut record = crate::types::RuleRecord::default();
        record.domain = Some(FieldValue::Many(vec![
            "a.com".into(),
            "b.com".into(),
            "a.com".into(),
        ]));
        record.domain_keyword = Some(FieldValue::Single("ads".into()));
        let set = normalize(&RawDocument::Records(vec![record]));

        assert_eq!(set.domain.len(), 2);
        assert!(set.domain_keyword.contains("ads"));
        assert!(set.domain_suffix.is_empty());
    }

    #[test]
    fn test_normalize_records_skip_empty_strings() {
        let mut record = crate::types::RuleRecord::default();
        record.domain = Some(FieldValue::Single(String::new()));
        record.domain_suffix = Some(FieldValue::Many(vec![String::new(), "y.com".into()]));
        let set = normalize(&RawDocument::Records(vec![record]));

        assert!(set.domain.is_empty());
        assert_eq!(set.domain_suffix.len(), 1);
    }

    #[test]
    fn test_normalize_empty_document() {
        assert!(normalize(&RawDocument::empty()).is_empty());
        assert!(normalize(&RawDocument::Payload(Vec::new())).is_empty());
    }
}
