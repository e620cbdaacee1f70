//! CSV output: one realization per row.

use anyhow::{Context, Result};
use ndarray::ArrayD;
use std::io::Write;

use super::Signal;

/// Writes `noise` with one realization per line and no header.
///
/// Values use Rust's shortest round-trip float formatting.
pub fn write_csv<W: Write>(noise: &ArrayD<f64>, mut writer: W) -> Result<()> {
    let samples = noise.shape().last().copied().unwrap_or(0).max(1);
    let values: Vec<f64> = noise.iter().copied().collect();

    for row in values.chunks(samples) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(writer, "{}", line.join(",")).context("Failed to write CSV row")?;
    }
    Ok(())
}

/// Reads a CSV written by [`write_csv`].
///
/// Blank lines are skipped; every row must have the same number of values.
/// The resulting shape is `[rows, columns]`.
pub fn read_csv(bytes: &[u8]) -> Result<Signal> {
    let text = std::str::from_utf8(bytes).context("CSV input is not valid UTF-8")?;

    let mut data = Vec::new();
    let mut rows = 0usize;
    let mut columns: Option<usize> = None;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row = line
            .split(',')
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Invalid number on CSV line {}", line_no + 1))?;

        match columns {
            None => columns = Some(row.len()),
            Some(expected) if expected != row.len() => {
                anyhow::bail!(
                    "CSV line {} has {} values, expected {}",
                    line_no + 1,
                    row.len(),
                    expected
                );
            }
            Some(_) => {}
        }

        data.extend(row);
        rows += 1;
    }

    let columns = columns.ok_or_else(|| anyhow::anyhow!("CSV input has no rows"))?;
    Ok(Signal {
        shape: vec![rows, columns],
        data,
    })
}
