use anyhow::Result;
use shared_types::ContactRecord;
use std::io::Write;

pub fn write_json<W: Write>(records: &[ContactRecord], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
