//! Terminal summary of a stability build
//!
//! # Example
//!
//! ```no_run
//! use stability_etch::{BuildPrinter, StabilityBuilder};
//!
//! let output = StabilityBuilder::new("out/doc/api").build().unwrap();
//! BuildPrinter::new(&output, true).print_to_stdout();
//! ```

use crate::builder::BuildOutput;
use crate::splice::SpliceOutcome;
use crate::stability::level_counts;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prints what a build did
pub struct BuildPrinter<'a> {
    /// Build to describe
    output: &'a BuildOutput,
    /// Whether to use colored output
    use_color: bool,
}

impl<'a> BuildPrinter<'a> {
    /// Create a new printer
    pub fn new(output: &'a BuildOutput, use_color: bool) -> Self {
        Self { output, use_color }
    }

    /// Print directly to stdout with colors
    pub fn print_to_stdout(&self) {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        if let Err(e) = self.write_colored(&mut stdout) {
            eprintln!("Error printing build summary: {}", e);
        }
    }

    /// Write with colors to a WriteColor implementor
    pub fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, "{}", self.heading())?;
        w.reset()?;
        writeln!(w)?;

        for (level, count) in level_counts(&self.output.rows) {
            writeln!(w, "  {:<14}{}", level.display(), count)?;
        }

        for target in &self.output.targets {
            write!(w, "  {:<10}", target.kind.display())?;
            w.set_color(ColorSpec::new().set_fg(Some(outcome_color(target.outcome))))?;
            write!(w, "{:<19}", target.outcome.display())?;
            w.reset()?;
            writeln!(w, "{}", target.path.display())?;
        }

        if let Some(path) = &self.output.stability_json {
            w.set_color(ColorSpec::new().set_fg(Some(Color::White)).set_italic(true))?;
            writeln!(w, "  rows written to {}", path.display())?;
            w.reset()?;
        }

        Ok(())
    }

    fn heading(&self) -> String {
        let suffix = if self.output.dry_run { " (dry run)" } else { "" };
        format!(
            "Stability overview: {} modules{}",
            self.output.rows.len(),
            suffix
        )
    }
}

fn outcome_color(outcome: SpliceOutcome) -> Color {
    match outcome {
        SpliceOutcome::Updated => Color::Green,
        SpliceOutcome::Unchanged => Color::Blue,
        SpliceOutcome::MarkersNotFound => Color::Yellow,
    }
}

impl Display for BuildPrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}", self.heading())?;
        for (level, count) in level_counts(&self.output.rows) {
            writeln!(f, "  {:<14}{}", level.display(), count)?;
        }
        for target in &self.output.targets {
            writeln!(
                f,
                "  {:<10}{:<19}{}",
                target.kind.display(),
                target.outcome.display(),
                target.path.display()
            )?;
        }
        if let Some(path) = &self.output.stability_json {
            writeln!(f, "  rows written to {}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splice::{TargetKind, TargetReport};
    use crate::stability::StabilityRow;
    use std::path::PathBuf;
    use termcolor::NoColor;

    fn output() -> BuildOutput {
        BuildOutput {
            rows: vec![StabilityRow {
                api: "fs".into(),
                link: "fs.html".into(),
                stability: 2,
                stability_text: "(2) Stable".into(),
            }],
            markdown: String::new(),
            html: String::new(),
            targets: vec![
                TargetReport {
                    kind: TargetKind::Markdown,
                    path: PathBuf::from("documentation.md"),
                    outcome: SpliceOutcome::Updated,
                },
                TargetReport {
                    kind: TargetKind::Json,
                    path: PathBuf::from("documentation.json"),
                    outcome: SpliceOutcome::MarkersNotFound,
                },
            ],
            stability_json: None,
            dry_run: true,
        }
    }

    #[test]
    fn test_display() {
        let output = output();
        let text = BuildPrinter::new(&output, false).to_string();

        assert!(text.starts_with("Stability overview: 1 modules (dry run)\n"));
        assert!(text.contains("  Stable        1\n"));
        assert!(text.contains("markdown  updated"));
        assert!(text.contains("json      markers not found  documentation.json"));
    }

    #[test]
    fn test_write_colored_matches_display() {
        let output = output();
        let printer = BuildPrinter::new(&output, false);
        let mut buf = NoColor::new(Vec::new());
        printer.write_colored(&mut buf).unwrap();

        let written = String::from_utf8(buf.into_inner()).unwrap();
        assert_eq!(written, printer.to_string());
    }
}
