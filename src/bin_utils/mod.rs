//! Bootstraps the library as a script runner: every row of the input is
//! dispatched through the [`OperationTable`] against one in-memory store, and
//! one outcome per row is written to the output.

use std::io::{Read, Write};

use crate::{
    processor::{LedgerError, operation_table::OperationTable},
    store::in_memory_store::InMemoryStateStore,
};
use anyhow::{Context, Result};
use csv_parser::CsvInvocationParser;
use csv_printer::{Outcome, print_outcomes};
pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, &LedgerError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvInvocationParser::new(self.input);

        let table = OperationTable::default();
        let mut store = InMemoryStateStore::default().without_journal();
        let mut outcomes = Vec::new();

        for row in parser {
            let (line, invocation) = row.context("Failed to read invocation script")?;
            let (status, payload) =
                match table.invoke(&mut store, &invocation.operation, &invocation.args) {
                    Ok(payload) => (
                        "ok".to_owned(),
                        payload
                            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                            .unwrap_or_default(),
                    ),
                    Err(err) => {
                        (self.error_printer)(line, &err);
                        (err.kind().to_string(), err.to_string())
                    }
                };
            outcomes.push(Outcome {
                line,
                operation: invocation.operation,
                status,
                payload,
            });
        }

        print_outcomes(self.output, outcomes.into_iter())
    }
}
