use std::io::Write;

use anyhow::Context;
use csv::Writer;
use serde::Serialize;

/// Result of one invocation. `payload` holds the returned bytes on success
/// and the error message on failure.
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub line: u64,
    pub operation: String,
    pub status: String,
    pub payload: String,
}

pub fn print_outcomes<W>(
    output: &mut W,
    outcomes: impl Iterator<Item = Outcome>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for outcome in outcomes {
        let line = outcome.line;
        writer
            .serialize(outcome)
            .with_context(|| format!("Failed to write outcome of line {line}"))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}
