use std::io::{self, Write};

use super::{MetricComparison, ReportError, Reporter};

/// A reporter that writes comparisons as a pretty-printed JSON array.
#[derive(Debug, Clone, Default)]
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    fn write_to(
        &self,
        writer: &mut impl Write,
        results: &[MetricComparison],
    ) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut *writer, results)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Reporter for JsonReporter {
    fn report(&self, results: &[MetricComparison]) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.write_to(&mut writer, results)
    }
}
