//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialized
//! support for validation reports and progress indicators.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use shapeguard_core::Diagnostic;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::trace;

/// Outcome of validating every document of one run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Schema the documents were validated against
    pub schema: PathBuf,
    /// One entry per value document, in argument order
    pub documents: Vec<DocumentReport>,
}

/// Outcome of validating a single document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new(schema: PathBuf) -> Self {
        Self {
            schema,
            documents: Vec::new(),
        }
    }

    /// Number of documents that failed validation
    pub fn failed(&self) -> usize {
        self.documents.iter().filter(|doc| !doc.valid).count()
    }

    pub fn total(&self) -> usize {
        self.documents.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Trait for formatting output with specialized support for reports
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report; `detailed` adds per-error fields in human output
    fn format_report(
        &self,
        report: &ValidationReport,
        detailed: bool,
        use_color: bool,
    ) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => {
                Ok(serde_json::to_string_pretty(value)?)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_report(
        &self,
        report: &ValidationReport,
        detailed: bool,
        use_color: bool,
    ) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report, detailed, use_color)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            // No progress bars with custom writers
            show_progress: false,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message (human format only)
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message (human format only)
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        match self.format {
            // serde_yaml already ends documents with a newline
            OutputFormat::Yaml => self.write(&formatted),
            _ => self.writeln(&formatted),
        }
    }

    /// Write a validation report with specialized formatting
    pub fn report(&mut self, report: &ValidationReport, detailed: bool) -> Result<()> {
        let formatted = self.format.format_report(report, detailed, self.use_color)?;
        match self.format {
            OutputFormat::Yaml => self.write(&formatted),
            _ => self.writeln(&formatted),
        }
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn format_report_human(report: &ValidationReport, detailed: bool, use_color: bool) -> String {
    let mut lines = Vec::new();

    for document in &report.documents {
        let name = document.path.display().to_string();
        lines.push(match (document.valid, use_color) {
            (true, true) => format!("{} {}", "✓".green(), name),
            (true, false) => format!("✓ {}", name),
            (false, true) => format!("{} {}", "✗".red(), name.bold()),
            (false, false) => format!("✗ {}", name),
        });

        for (index, diagnostic) in document.errors.iter().enumerate() {
            format_diagnostic_human(&mut lines, index + 1, diagnostic, detailed);
        }
    }

    let summary = if report.is_success() {
        format!("{} document(s) match {}", report.total(), report.schema.display())
    } else {
        format!(
            "{} of {} document(s) failed validation against {}",
            report.failed(),
            report.total(),
            report.schema.display()
        )
    };
    lines.push(String::new());
    lines.push(match (report.is_success(), use_color) {
        (true, true) => summary.green().to_string(),
        (false, true) => summary.red().to_string(),
        _ => summary,
    });

    lines.join("\n")
}

fn format_diagnostic_human(
    lines: &mut Vec<String>,
    number: usize,
    diagnostic: &Diagnostic,
    detailed: bool,
) {
    let prefix = format!("  {}. ", number);
    let continuation = " ".repeat(prefix.chars().count());

    let mut message_lines = diagnostic.message.lines();
    if let Some(first) = message_lines.next() {
        lines.push(format!("{}{}", prefix, first));
    }
    for line in message_lines {
        lines.push(format!("{}{}", continuation, line));
    }

    if detailed {
        lines.push(format!("{}kind: {}", continuation, diagnostic.kind));
        if let Some(expected) = &diagnostic.expected {
            lines.push(format!("{}expected: {}", continuation, expected));
        }
        if let Some(actual_type) = diagnostic.actual_type {
            lines.push(format!("{}actual type: {}", continuation, actual_type));
        }
    }
}
