//! Plain-text summary report.

use crate::model::{LogType, Qualification, ValidationState};
use crate::summary::{Summary, SummaryItem};
use owo_colors::{OwoColorize, Style};
use std::io::{Result, Write};

/// Number of items listed per section unless the report is verbose.
const ITEMS_PER_SECTION: usize = 10;

const RULE: &str = "\t----------------------";

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// List every item instead of the first few per section.
    pub verbose: bool,
    pub colors: bool,
}

impl ReportOptions {
    fn paint(self, text: &str, style: Style) -> String {
        if self.colors {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Write the error and warning sections followed by the counts.
pub fn generate<W: Write>(summary: &Summary, options: ReportOptions, writer: &mut W) -> Result<()> {
    write_section(
        writer,
        &options.paint("Errors:", Style::new().red().bold()),
        summary.items_of(&LogType::Error),
        options,
    )?;
    write_section(
        writer,
        &options.paint("Warnings:", Style::new().yellow().bold()),
        summary.items_of(&LogType::Warning),
        options,
    )?;

    writeln!(writer)?;
    writeln!(writer, "{RULE}")?;
    writeln!(writer, "\tError count:  {}", summary.error_count)?;
    writeln!(writer, "\tWarning count:  {}", summary.warning_count)?;
    writeln!(writer, "{RULE}")?;
    writeln!(writer)
}

fn write_section<'a, W: Write>(
    writer: &mut W,
    title: &str,
    items: impl Iterator<Item = &'a SummaryItem>,
    options: ReportOptions,
) -> Result<()> {
    let mut items = items.peekable();
    if items.peek().is_none() {
        return Ok(());
    }

    writeln!(writer)?;
    writeln!(writer, "\t{title}")?;
    for (index, item) in items.enumerate() {
        if index >= ITEMS_PER_SECTION && !options.verbose {
            writeln!(writer, "\t\t...")?;
            break;
        }
        writeln!(writer, "\t\t{} - ({})", item.message, item.display_path())?;
    }

    Ok(())
}

/// Point to the detailed result page and state the verdict.
pub fn write_verdict<W: Write>(qualification: &Qualification, result_page: &str, options: ReportOptions, writer: &mut W) -> Result<()> {
    writeln!(writer, "Visit the {result_page} or use --verbose option for detailed result")?;

    let style = if qualification.is_passing() {
        Style::new().green().bold()
    } else {
        Style::new().red().bold()
    };
    writeln!(
        writer,
        "corp-check validation {}",
        options.paint(qualification.verdict(), style)
    )
}

/// Report a validation that ended without an evaluation tree.
pub fn write_no_result<W: Write>(state: Option<&ValidationState>, result_page: &str, writer: &mut W) -> Result<()> {
    writeln!(writer, "Visit the {result_page} for more info")?;
    writeln!(writer, "corp-check validation has no result")?;
    match state {
        Some(state) => writeln!(writer, "{}", state.state_type),
        None => writeln!(writer, "UNKNOWN"),
    }
}
