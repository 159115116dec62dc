use shared_types::{ContactRecord, DedupeOutcome};
use std::collections::HashSet;

/// Drop records whose name, address, phones and emails all match an earlier
/// record. `source` and `raw` are not compared. The first occurrence is kept
/// and the relative order of kept records is unchanged.
pub fn dedupe(records: Vec<ContactRecord>) -> DedupeOutcome {
    let total = records.len();

    let first_seen: Vec<bool> = {
        let mut seen = HashSet::new();
        records
            .iter()
            .map(|record| seen.insert(record.identity()))
            .collect()
    };

    let kept: Vec<ContactRecord> = records
        .into_iter()
        .zip(first_seen)
        .filter_map(|(record, first)| first.then_some(record))
        .collect();

    let removed = total - kept.len();
    DedupeOutcome { kept, removed }
}
