use serde::{Deserialize, Serialize};

/// Name used when a cell holds nothing but phone numbers and emails
pub const UNKNOWN_CONTACT_NAME: &str = "Unknown";

/// Contact fields parsed out of a single table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub address: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    /// Original cell text with newlines replaced by `" | "`
    pub raw: String,
    /// Path of the document the cell came from
    pub source: Option<String>,
}

impl ContactRecord {
    /// Attach the originating document. This is the only mutation a record
    /// goes through after parsing.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Fields that identify a contact regardless of where it was found
    pub fn identity(&self) -> (&str, &str, &[String], &[String]) {
        (&self.name, &self.address, &self.phones, &self.emails)
    }
}

/// Result of removing structurally identical records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeOutcome {
    pub kept: Vec<ContactRecord>,
    pub removed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: Option<&str>) -> ContactRecord {
        ContactRecord {
            name: "Cabinet Martin".to_string(),
            address: "3 place Bellecour 69002 Lyon".to_string(),
            phones: vec!["04 78 00 00 00".to_string()],
            emails: vec![],
            raw: "Cabinet Martin | 3 place Bellecour 69002 Lyon | 04 78 00 00 00".to_string(),
            source: source.map(str::to_string),
        }
    }

    #[test]
    fn test_with_source_only_touches_source() {
        let parsed = record(None);
        let attached = parsed.clone().with_source("docs/a.pdf");

        assert_eq!(attached.source.as_deref(), Some("docs/a.pdf"));
        assert_eq!(attached.identity(), parsed.identity());
        assert_eq!(attached.raw, parsed.raw);
    }

    #[test]
    fn test_identity_ignores_source_and_raw() {
        let a = record(Some("a.pdf"));
        let mut b = record(Some("b.docx"));
        b.raw = "something else".to_string();

        assert_eq!(a.identity(), b.identity());
        assert_ne!(a, b);
    }

    #[test]
    fn test_serializes_with_field_names() {
        let json = serde_json::to_value(record(Some("a.odt"))).unwrap();
        assert_eq!(json["name"], "Cabinet Martin");
        assert_eq!(json["phones"][0], "04 78 00 00 00");
        assert_eq!(json["source"], "a.odt");
    }
}
