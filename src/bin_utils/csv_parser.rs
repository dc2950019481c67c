use std::io::Read;

use csv::{StringRecord, StringRecordsIntoIter, Trim};

/// One row of a script: operation name followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: String,
    pub args: Vec<String>,
}

impl Invocation {
    fn from_record(record: &StringRecord) -> Self {
        let mut fields = record.iter().map(str::to_owned);
        Self {
            operation: fields.next().unwrap_or_default(),
            args: fields.collect(),
        }
    }
}

/// Parses invocation scripts in CSV format.
///
/// Rows have no header and a variable number of fields. Lines starting with
/// `#` are skipped.
pub struct CsvInvocationParser<R> {
    iter: StringRecordsIntoIter<R>,
}

impl<R> CsvInvocationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(source);

        Self {
            iter: reader.into_records(),
        }
    }
}

impl<R> Iterator for CsvInvocationParser<R>
where
    R: Read,
{
    /// Line of the row in the script, and the invocation it holds.
    type Item = csv::Result<(u64, Invocation)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|row| {
            row.map(|record| {
                let line = record.position().map_or(0, |pos| pos.line());
                (line, Invocation::from_record(&record))
            })
        })
    }
}
