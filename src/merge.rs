use crate::types::RuleSet;

/// Merge rule sets and eliminate cross-category redundancy.
///
/// The canonical policy, applied with precedence
/// `Domain > DomainSuffix > DomainKeyword`:
///
/// 1. union each category independently across all inputs;
/// 2. drop suffix entries that literally duplicate a domain entry;
/// 3. drop keyword entries that are a substring of any retained domain
///    or suffix entry, checked against the already-pruned sets.
///
/// Set union is commutative, so the order of the input sets never
/// affects the result, and merging a set with itself is a no-op.
pub fn merge<I>(sets: I) -> RuleSet
where
    I: IntoIterator<Item = RuleSet>,
{
    let mut merged = RuleSet::new();
    for set in sets {
        merged.extend(set);
    }

    let RuleSet {
        domain,
        mut domain_suffix,
        mut domain_keyword,
    } = merged;

    // A suffix that duplicates an exact domain entry only adds a
    // broader, redundant match. Only the literal duplicate goes: a
    // suffix `x.com` stays even when `y.x.com` is a domain entry.
    domain_suffix.retain(|suffix| !domain.contains(suffix));

    // A keyword contained in a retained domain or suffix entry can
    // never independently change matching behavior: any domain the
    // keyword matches is already covered by the more specific entry.
    domain_keyword.retain(|keyword| {
        !domain
            .iter()
            .chain(domain_suffix.iter())
            .any(|entry| entry.contains(keyword.as_str()))
    });

    RuleSet {
        domain,
        domain_suffix,
        domain_keyword,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleCategory;

    fn set_of(domain: &[&str], suffix: &[&str], keyword: &[&str]) -> RuleSet {
        let mut set = RuleSet::new();
        for v in domain {
            set.insert(RuleCategory::Domain, *v);
        }
        for v in suffix {
            set.insert(RuleCategory::DomainSuffix, *v);
        }
        for v in keyword {
            set.insert(RuleCategory::DomainKeyword, *v);
        }
        set
    }

    #[test]
    fn test_merge_unions_categories() {
        let merged = merge([
            set_of(&["a.com"], &[], &[]),
            set_of(&["b.com"], &["c.net"], &[]),
        ]);
        assert_eq!(merged.domain.len(), 2);
        assert_eq!(merged.domain_suffix.len(), 1);
    }

    #[test]
    fn test_merge_prunes_suffix_duplicating_domain() {
        let merged = merge([
            set_of(&["a.com"], &[], &[]),
            set_of(&[], &["a.com"], &[]),
        ]);
        assert!(merged.domain.contains("a.com"));
        assert!(merged.domain_suffix.is_empty());
    }

    #[test]
    fn test_merge_keeps_suffix_of_subdomain_entry() {
        // `x.com` is not a literal duplicate of the domain `y.x.com`,
        // so the broader suffix entry survives.
        let merged = merge([set_of(&["y.x.com"], &["x.com"], &[])]);
        assert!(merged.domain.contains("y.x.com"));
        assert!(merged.domain_suffix.contains("x.com"));
    }

    #[test]
    fn test_merge_prunes_keyword_contained_in_domain() {
        let merged = merge([set_of(&["shop.example.com"], &[], &["example"])]);
        assert!(merged.domain.contains("shop.example.com"));
        assert!(merged.domain_keyword.is_empty());
    }

    #[test]
    fn test_merge_prunes_keyword_contained_in_suffix() {
        let merged = merge([set_of(&[], &["tracker.net"], &["tracker"])]);
        assert!(merged.domain_suffix.contains("tracker.net"));
        assert!(merged.domain_keyword.is_empty());
    }

    #[test]
    fn test_merge_keeps_independent_keyword() {
        let merged = merge([set_of(&["a.com"], &["b.net"], &["analytics"])]);
        assert!(merged.domain_keyword.contains("analytics"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let set = set_of(&["a.com"], &["a.com", "b.net"], &["ads"]);
        let once = merge([set.clone()]);
        let twice = merge([once.clone(), once.clone()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = set_of(&["a.com", "shop.example.com"], &["b.net"], &["example"]);
        let b = set_of(&["b.net"], &["a.com"], &["shop"]);
        assert_eq!(merge([a.clone(), b.clone()]), merge([b, a]));
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge(Vec::new()).is_empty());
        assert!(merge([RuleSet::new(), RuleSet::new()]).is_empty());
    }
}
