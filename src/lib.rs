//! Rule Aggregator - merges domain rule lists for proxy routing engines
//!
//! This library fetches domain-matching rules (block/allow lists) from
//! multiple remote sources in heterogeneous formats, normalizes them into
//! a canonical three-category schema, eliminates cross-category
//! redundancy, and emits per-group artifacts in the two downstream
//! formats consumed by routing engines.
//!
//! # Example
//!
//! ```rust
//! use rule_aggregator_r::{merge, normalize, parse, SourceFormat};
//!
//! let clash = "DOMAIN,shop.example.com\nDOMAIN-KEYWORD,example\n# comment";
//! let sing = r#"{"rules":[{"domain_suffix":["cdn.example.org"]}]}"#;
//!
//! let sets = [
//!     normalize(&parse(clash, SourceFormat::Text).unwrap()),
//!     normalize(&parse(sing, SourceFormat::Json).unwrap()),
//! ];
//! let merged = merge(sets);
//!
//! assert!(merged.domain.contains("shop.example.com"));
//! assert!(merged.domain_suffix.contains("cdn.example.org"));
//! // "example" is covered by the retained domain entry and is pruned.
//! assert!(merged.domain_keyword.is_empty());
//! ```
//!
//! # Rule Categories
//!
//! | Category | Line prefix | Matches |
//! |----------|-------------|---------|
//! | Domain | `DOMAIN` | the exact domain name |
//! | DomainSuffix | `DOMAIN-SUFFIX` | any domain ending with the suffix |
//! | DomainKeyword | `DOMAIN-KEYWORD` | any domain containing the substring |
//!
//! Precedence runs `Domain > DomainSuffix > DomainKeyword`: during a
//! merge, a suffix identical to a domain entry is dropped, and a keyword
//! contained in any retained domain or suffix entry is dropped.
//!
//! # Source Formats
//!
//! A source URL's extension selects its parser: `.json` and
//! `.yaml`/`.yml` are structured rule documents (either a `rules` record
//! list or a flat `payload` line list), `.txt`/`.conf` are line-oriented
//! text. Anything else is skipped as unsupported.

pub mod aggregate;
pub mod config;
pub mod encode;
pub mod error;
pub mod fetch;
pub mod format;
pub mod merge;
pub mod normalize;
pub mod parser;
pub mod types;

// Re-export commonly used items
pub use aggregate::{Aggregator, DEFAULT_WORKERS};
pub use config::{Config, RuleGroup};
pub use encode::{
    canonical_json, line_document, write_artifacts, CanonicalDocument, CanonicalRule,
    CANONICAL_VERSION,
};
pub use error::{AggregateError, Result};
pub use fetch::{
    HttpFetcher, MemoryFetcher, RuleFetcher, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT,
};
pub use format::SourceFormat;
pub use merge::merge;
pub use normalize::normalize;
pub use parser::parse;
pub use types::{FieldValue, RawDocument, RuleCategory, RuleRecord, RuleSet};
