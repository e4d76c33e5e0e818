use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::normalize::RawFixture;

pub const DEFAULT_FIXTURES_CSV: &str = "data/primera_division_2024_fixtures.csv";

/// Write the fixtures CSV, tmp-file + rename so a crash never leaves a
/// half-written file behind.
pub fn save_fixtures_csv(path: &Path, rows: &[RawFixture]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("create fixtures directory")?;
    }

    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp).context("open fixtures csv for write")?;
        for row in rows {
            writer.serialize(row).context("write fixture row")?;
        }
        writer.flush().context("flush fixtures csv")?;
    }
    fs::rename(&tmp, path).context("swap fixtures csv")?;
    Ok(())
}

pub fn load_fixtures_csv(path: &Path) -> Result<Vec<RawFixture>> {
    if !path.exists() {
        return Err(anyhow!(
            "fixtures file {} not found; run the fetch_fixtures binary first or pass --demo",
            path.display()
        ));
    }
    let mut reader = csv::Reader::from_path(path).context("open fixtures csv")?;
    let mut out = Vec::new();
    for record in reader.deserialize() {
        let row: RawFixture = record.context("malformed fixture row")?;
        out.push(row);
    }
    Ok(out)
}
