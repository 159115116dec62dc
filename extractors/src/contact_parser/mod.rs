mod parser;

pub use parser::{ContactParser, ParserConfig};

use regex::Regex;

/// French phone numbers: `+33`, `0033` or a national `0`, then a digit 1-9 and
/// four two-digit groups. Group separators (space, dot, hyphen) are optional
/// and may differ from one group to the next.
pub const PHONE_PATTERN: &str = r"(?:(?:\+|00)33|0)\s*[1-9](?:[\s.-]*\d{2}){4}";

/// `local@domain.tld` with a TLD of at least two letters
pub const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

/// Compiled phone and email recognizers
pub struct ContactPatterns {
    phone: Regex,
    email: Regex,
}

impl ContactPatterns {
    pub fn new() -> Self {
        Self {
            phone: Regex::new(PHONE_PATTERN).unwrap(),
            email: Regex::new(EMAIL_PATTERN).unwrap(),
        }
    }

    /// Every non-overlapping phone match, left to right
    pub fn find_phones(&self, text: &str) -> Vec<String> {
        self.phone
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Every non-overlapping email match, left to right
    pub fn find_emails(&self, text: &str) -> Vec<String> {
        self.email
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for ContactPatterns {
    fn default() -> Self {
        Self::new()
    }
}
