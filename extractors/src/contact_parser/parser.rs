use crate::contact_parser::ContactPatterns;
use serde::{Deserialize, Serialize};
use shared_types::{ContactRecord, UNKNOWN_CONTACT_NAME};

/// Cells shorter than this after trimming are treated as noise
pub const DEFAULT_MIN_CELL_LENGTH: usize = 5;

/// Delimiter standing in for line breaks in the audit copy of a cell
pub const RAW_LINE_DELIMITER: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub min_cell_length: usize,
    pub unknown_name: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_cell_length: DEFAULT_MIN_CELL_LENGTH,
            unknown_name: UNKNOWN_CONTACT_NAME.to_string(),
        }
    }
}

/// Splits a free-text table cell into name, address, phones and emails
pub struct ContactParser {
    patterns: ContactPatterns,
    config: ParserConfig,
}

impl ContactParser {
    /// A blank `unknown_name` falls back to [`UNKNOWN_CONTACT_NAME`] so parsed
    /// names are never empty.
    pub fn new(mut config: ParserConfig) -> Self {
        if config.unknown_name.trim().is_empty() {
            config.unknown_name = UNKNOWN_CONTACT_NAME.to_string();
        }

        Self {
            patterns: ContactPatterns::new(),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ParserConfig::default())
    }

    /// Parse one cell. Returns `None` for cells too short to hold a contact.
    pub fn parse(&self, raw_cell: &str) -> Option<ContactRecord> {
        if raw_cell.trim().chars().count() < self.config.min_cell_length {
            return None;
        }

        let lines: Vec<&str> = raw_cell
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        // Matched over the whole cell so numbers wrapped across lines still count
        let phones = self.patterns.find_phones(raw_cell);
        let emails = self.patterns.find_emails(raw_cell);

        // Emails go first: a phone-like run of digits can sit inside an address
        let matched: Vec<&str> = emails
            .iter()
            .chain(phones.iter())
            .map(String::as_str)
            .collect();

        let residual: Vec<String> = lines
            .iter()
            .map(|line| strip_matches(line, &matched))
            .filter(|line| line.chars().count() > 1)
            .collect();

        let (name, address) = match residual.split_first() {
            Some((first, rest)) => (first.clone(), rest.join(" ")),
            None => (self.config.unknown_name.clone(), String::new()),
        };

        Some(ContactRecord {
            name,
            address,
            phones,
            emails,
            raw: raw_cell.replace('\n', RAW_LINE_DELIMITER),
            source: None,
        })
    }
}

impl Default for ContactParser {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Remove every literal occurrence of the matched strings from a line.
///
/// Whitespace is only touched at the seams a removal leaves behind: the text
/// on either side is rejoined with a single space, and text that was never
/// matched keeps its spacing.
fn strip_matches(line: &str, matched: &[&str]) -> String {
    let mut current = line.to_string();

    for needle in matched.iter().filter(|n| !n.is_empty()) {
        if current.contains(needle) {
            let pieces: Vec<&str> = current.split(needle).collect();
            let joined = join_at_seams(&pieces);
            current = joined;
        }
    }

    current.trim().to_string()
}

fn join_at_seams(pieces: &[&str]) -> String {
    let last = pieces.len().saturating_sub(1);
    let mut joined = String::new();

    for (i, piece) in pieces.iter().enumerate() {
        let piece = match (i == 0, i == last) {
            (true, true) => *piece,
            (true, false) => piece.trim_end(),
            (false, true) => piece.trim_start(),
            (false, false) => piece.trim(),
        };
        if !joined.is_empty() && !piece.is_empty() {
            joined.push(' ');
        }
        joined.push_str(piece);
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<ContactRecord> {
        ContactParser::with_defaults().parse(text)
    }

    #[test]
    fn test_full_contact_block() {
        let record =
            parse("Jean Dupont\n12 Rue de Paris\n06 12 34 56 78\njean.dupont@email.fr").unwrap();

        assert_eq!(record.name, "Jean Dupont");
        assert_eq!(record.address, "12 Rue de Paris");
        assert_eq!(record.phones, vec!["06 12 34 56 78"]);
        assert_eq!(record.emails, vec!["jean.dupont@email.fr"]);
        assert_eq!(
            record.raw,
            "Jean Dupont | 12 Rue de Paris | 06 12 34 56 78 | jean.dupont@email.fr"
        );
        assert!(record.source.is_none());
    }

    #[test]
    fn test_short_cells_are_noise() {
        assert!(parse("").is_none());
        assert!(parse("  ").is_none());
        assert!(parse("\n\t\n").is_none());
        assert!(parse("  abcd  ").is_none());
        assert!(parse("Nom\n").is_none());
        assert!(parse("abcde").is_some());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // four characters, eight bytes
        assert!(parse("éèàç").is_none());
    }

    #[test]
    fn test_email_only_cell_has_unknown_name() {
        let record = parse("contact@firm.com").unwrap();

        assert_eq!(record.name, "Unknown");
        assert_eq!(record.address, "");
        assert_eq!(record.emails, vec!["contact@firm.com"]);
        assert!(record.phones.is_empty());
    }

    #[test]
    fn test_phone_removed_from_surrounding_text() {
        let record = parse("Tel: 0033 6 12.34-56.78 (mobile)").unwrap();

        assert_eq!(record.phones, vec!["0033 6 12.34-56.78"]);
        assert_eq!(record.name, "Tel: (mobile)");
        assert_eq!(record.address, "");
    }

    #[test]
    fn test_single_character_leftovers_are_dropped() {
        let record = parse("Cabinet Martin\n06 12 34 56 78 /\n- contact@martin.fr").unwrap();

        assert_eq!(record.name, "Cabinet Martin");
        assert_eq!(record.address, "");
    }

    #[test]
    fn test_address_joins_remaining_lines() {
        let record = parse(
            "  SARL Boulangerie Petit  \n\n  4 avenue Foch \n Bât. B\n75016 Paris\n",
        )
        .unwrap();

        assert_eq!(record.name, "SARL Boulangerie Petit");
        assert_eq!(record.address, "4 avenue Foch Bât. B 75016 Paris");
    }

    #[test]
    fn test_multiple_phones_and_emails_keep_order() {
        let record = parse(
            "Mme Claire Roux\nFixe 01 23 45 67 89 - Port. 07.11.22.33.44\nclaire@roux.fr / secretariat@roux.fr",
        )
        .unwrap();

        assert_eq!(record.phones, vec!["01 23 45 67 89", "07.11.22.33.44"]);
        assert_eq!(record.emails, vec!["claire@roux.fr", "secretariat@roux.fr"]);
        assert_eq!(record.name, "Mme Claire Roux");
        assert_eq!(record.address, "Fixe - Port.");
    }

    #[test]
    fn test_no_contact_details() {
        let record = parse("Association des Amis\ndu Vieux Lyon").unwrap();

        assert_eq!(record.name, "Association des Amis");
        assert_eq!(record.address, "du Vieux Lyon");
        assert!(record.phones.is_empty());
        assert!(record.emails.is_empty());
    }

    #[test]
    fn test_phone_digits_inside_email_are_removed_with_the_email() {
        let record = parse("M. Durand\n0612345678@sms.example.fr").unwrap();

        assert_eq!(record.emails, vec!["0612345678@sms.example.fr"]);
        assert_eq!(record.phones, vec!["0612345678"]);
        assert_eq!(record.name, "M. Durand");
        assert_eq!(record.address, "");
    }

    #[test]
    fn test_matches_never_survive_in_name_or_address() {
        let inputs = [
            "Jean Dupont\n12 Rue de Paris\n06 12 34 56 78\njean.dupont@email.fr",
            "Tel: 0033 6 12.34-56.78 (mobile)",
            "A. Bernard tel 0612345678 mail a.bernard@x.fr fin",
            "06 12 34 56 78 06 12 34 56 78\nDr Petit",
            "0606 12 34 56 78 78",
        ];

        for input in inputs {
            let record = parse(input).unwrap();
            for needle in record.phones.iter().chain(record.emails.iter()) {
                assert!(!record.name.contains(needle.as_str()), "{input}");
                assert!(!record.address.contains(needle.as_str()), "{input}");
            }
        }
    }

    #[test]
    fn test_binary_garbage_does_not_panic() {
        let garbage = "\u{0}\u{1}\u{fffd}\u{7f}@@..--++\r\n\r\n\u{200b}";
        let record = parse(garbage);
        assert!(record.is_some());
        assert!(!record.unwrap().name.is_empty());
    }

    #[test]
    fn test_unmatched_text_keeps_its_spacing() {
        let record = parse("Jean   Dupont\nLyon\t69002").unwrap();

        assert_eq!(record.name, "Jean   Dupont");
        assert_eq!(record.address, "Lyon\t69002");
    }

    #[test]
    fn test_removal_seams_collapse_to_one_space() {
        let record = parse("SCI  Les Tilleuls\nBureau   06 12 34 56 78   Accueil").unwrap();

        assert_eq!(record.name, "SCI  Les Tilleuls");
        assert_eq!(record.address, "Bureau Accueil");
    }

    #[test]
    fn test_spacing_differences_are_not_duplicates() {
        let a = parse("Jean Dupont\n12 Rue de Paris").unwrap();
        let b = parse("Jean  Dupont\n12 Rue de Paris").unwrap();

        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn test_blank_unknown_name_falls_back() {
        for unknown_name in ["", "   "] {
            let parser = ContactParser::new(ParserConfig {
                min_cell_length: 5,
                unknown_name: unknown_name.to_string(),
            });

            let record = parser.parse("contact@firm.com").unwrap();
            assert_eq!(record.name, UNKNOWN_CONTACT_NAME);
        }
    }

    #[test]
    fn test_custom_config() {
        let parser = ContactParser::new(ParserConfig {
            min_cell_length: 2,
            unknown_name: "Inconnu".to_string(),
        });

        assert!(parser.parse("a").is_none());
        let record = parser.parse("x@yz.fr").unwrap();
        assert_eq!(record.name, "Inconnu");
    }
}
