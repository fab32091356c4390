use std::path::Path;

/// Declared content format of a rule source, derived from its URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Structured JSON rule document
    Json,
    /// Structured YAML rule document
    Yaml,
    /// Line-oriented text rules
    Text,
}

impl SourceFormat {
    /// Detect format from the URL's declared extension.
    ///
    /// Query strings and fragments are ignored. Any other extension is
    /// unsupported and the source is skipped by the caller.
    pub fn detect(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "txt" | "conf" => Some(SourceFormat::Text),
            _ => None,
        }
    }
}
