use std::io::{self, Write};

use colored::Colorize;

use super::{MetricComparison, ReportError, Reporter};
use crate::config::{DifferenceType, FrequentistConfig};
use crate::result::Verdict;

/// A reporter that outputs metric comparison results to the terminal.
#[derive(Debug, Clone)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
    difference_type: DifferenceType,
    test_value: f64,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self {
            use_colors: true,
            difference_type: DifferenceType::Relative,
            test_value: 0.0,
        }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self {
            use_colors: false,
            ..Self::new()
        }
    }

    /// Format effects and verdicts the way `config` computed them.
    pub fn with_config(mut self, config: &FrequentistConfig) -> Self {
        self.difference_type = config.difference_type();
        self.test_value = config.test_value();
        self
    }

    /// Format a mean with a precision suited to its magnitude.
    fn format_mean(mean: f64) -> String {
        let magnitude = mean.abs();
        if magnitude >= 1_000.0 {
            format!("{:.1}", mean)
        } else if magnitude >= 1.0 {
            format!("{:.3}", mean)
        } else {
            format!("{:.4}", mean)
        }
    }

    /// Format an effect on the configured scale.
    fn format_effect(&self, effect: f64) -> String {
        match self.difference_type {
            DifferenceType::Relative => format!("{:+.2}%", effect * 100.0),
            DifferenceType::Absolute => format!("{:+.4}", effect),
        }
    }

    fn format_interval(&self, ci: [f64; 2]) -> String {
        format!(
            "[{}, {}]",
            self.format_effect(ci[0]),
            self.format_effect(ci[1])
        )
    }

    fn paint(&self, text: String, verdict: Verdict) -> String {
        if !self.use_colors {
            return text;
        }
        match verdict {
            Verdict::Better => text.green().to_string(),
            Verdict::Worse => text.red().to_string(),
            Verdict::Inconclusive => text.yellow().to_string(),
            Verdict::InsufficientData => text.dimmed().to_string(),
        }
    }

    fn verdict_label(verdict: Verdict) -> &'static str {
        match verdict {
            Verdict::Better => "better",
            Verdict::Worse => "worse",
            Verdict::Inconclusive => "inconclusive",
            Verdict::InsufficientData => "insufficient data",
        }
    }

    /// Print the table header.
    fn print_header(&self, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer)?;
        let header = format!(
            "{:<30} {:>12} {:>12} {:>10} {:>24} {:>10} {:>18}",
            "Metric", "Control", "Treatment", "Change", "CI", "p-value", "Result"
        );
        if self.use_colors {
            writeln!(writer, "{}", header.bold())?;
        } else {
            writeln!(writer, "{}", header)?;
        }
        writeln!(writer, "{}", "-".repeat(122))?;
        Ok(())
    }

    /// Print a single metric row.
    fn print_row(&self, writer: &mut impl Write, comparison: &MetricComparison) -> io::Result<()> {
        let name = if comparison.name.chars().count() > 28 {
            let truncated: String = comparison.name.chars().take(25).collect();
            format!("{}...", truncated)
        } else {
            comparison.name.clone()
        };

        let result = &comparison.result;
        let verdict = result.verdict(self.test_value);

        let (change, interval) = if verdict == Verdict::InsufficientData {
            ("-".to_string(), "-".to_string())
        } else {
            (
                self.format_effect(result.expected),
                self.format_interval(result.ci),
            )
        };

        // Pad before coloring so ANSI escapes don't break alignment.
        let change = self.paint(format!("{:>10}", change), verdict);
        let label = self.paint(
            format!("{:>18}", Self::verdict_label(verdict)),
            verdict,
        );

        writeln!(
            writer,
            "{:<30} {:>12} {:>12} {} {:>24} {:>10} {}",
            name,
            Self::format_mean(comparison.control.mean()),
            Self::format_mean(comparison.treatment.mean()),
            change,
            interval,
            format!("{:.4}", result.p_value),
            label,
        )?;
        Ok(())
    }

    /// Print the summary footer.
    fn print_summary(
        &self,
        writer: &mut impl Write,
        results: &[MetricComparison],
    ) -> io::Result<()> {
        let mut better = 0;
        let mut worse = 0;
        let mut inconclusive = 0;
        let mut insufficient = 0;

        for comparison in results {
            match comparison.result.verdict(self.test_value) {
                Verdict::Better => better += 1,
                Verdict::Worse => worse += 1,
                Verdict::Inconclusive => inconclusive += 1,
                Verdict::InsufficientData => insufficient += 1,
            }
        }

        writeln!(writer)?;
        writeln!(writer, "{}", "-".repeat(122))?;

        let summary_label = "Summary:";
        if self.use_colors {
            write!(writer, "{} ", summary_label.bold())?;
        } else {
            write!(writer, "{} ", summary_label)?;
        }

        writeln!(
            writer,
            "{}, {}, {}, {}",
            self.paint(format!("{} better", better), Verdict::Better),
            self.paint(format!("{} worse", worse), Verdict::Worse),
            self.paint(format!("{} inconclusive", inconclusive), Verdict::Inconclusive),
            self.paint(
                format!("{} insufficient data", insufficient),
                Verdict::InsufficientData
            ),
        )?;

        writeln!(writer)?;
        Ok(())
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, results: &[MetricComparison]) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();

        self.print_header(&mut writer)?;

        for comparison in results {
            self.print_row(&mut writer, comparison)?;
        }

        self.print_summary(&mut writer, results)?;

        Ok(())
    }
}
