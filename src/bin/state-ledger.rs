use std::fs::File;

use anyhow::{Context, Result};
use state_ledger::{bin_utils::Service, processor::ErrorKind};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| {
            match err.kind() {
                ErrorKind::InvalidArgument | ErrorKind::UnknownOperation => {
                    eprintln!("Error at line {line}: {err}")
                }
                // reported in the output, the script itself is fine
                _ => {}
            }
        }),
    };
    service.run()
}
