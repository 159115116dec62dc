use anyhow::Result;
use csv::WriterBuilder;
use shared_types::ContactRecord;
use std::io::Write;

/// Column names: name and address first, then as many `phone_N` and
/// `email_N` columns as the widest record needs, then the audit columns
pub fn csv_headers(records: &[ContactRecord]) -> Vec<String> {
    let max_phones = records.iter().map(|r| r.phones.len()).max().unwrap_or(0);
    let max_emails = records.iter().map(|r| r.emails.len()).max().unwrap_or(0);

    let mut headers = vec!["name".to_string(), "address".to_string()];
    headers.extend((1..=max_phones).map(|i| format!("phone_{}", i)));
    headers.extend((1..=max_emails).map(|i| format!("email_{}", i)));
    headers.push("raw_extraction".to_string());
    headers.push("source_file".to_string());
    headers
}

fn flatten_record(record: &ContactRecord, max_phones: usize, max_emails: usize) -> Vec<&str> {
    let mut row = vec![record.name.as_str(), record.address.as_str()];
    row.extend((0..max_phones).map(|i| record.phones.get(i).map_or("", String::as_str)));
    row.extend((0..max_emails).map(|i| record.emails.get(i).map_or("", String::as_str)));
    row.push(record.raw.as_str());
    row.push(record.source.as_deref().unwrap_or(""));
    row
}

pub fn write_csv<W: Write>(records: &[ContactRecord], writer: W) -> Result<()> {
    let max_phones = records.iter().map(|r| r.phones.len()).max().unwrap_or(0);
    let max_emails = records.iter().map(|r| r.emails.len()).max().unwrap_or(0);

    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(csv_headers(records))?;

    for record in records {
        writer.write_record(flatten_record(record, max_phones, max_emails))?;
    }

    writer.flush()?;
    Ok(())
}
