use std::io::{IsTerminal, Write};

use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use indicatif::{ProgressBar, ProgressStyle};

use crate::aggregate::FinalReport;
use crate::config::SEPARATOR_WIDTH;

pub const MARKER: Color = Color::Cyan;
pub const OK: Color = Color::Green;
pub const FAIL: Color = Color::Red;
pub const DIM: Color = Color::DarkGrey;

/// Line-oriented report output. Colour only when writing to a terminal;
/// lines go out with the spinner (if any) suspended.
pub struct Console<W: Write> {
    out: W,
    color: bool,
    spinner: Option<ProgressBar>,
}

impl Console<std::io::Stdout> {
    pub fn stdout() -> Self {
        let out = std::io::stdout();
        let color = out.is_terminal();
        Self {
            out,
            color,
            spinner: None,
        }
    }
}

#[cfg(test)]
impl Console<Vec<u8>> {
    /// Plain in-memory console for tests
    pub fn buffer() -> Self {
        Self {
            out: Vec::new(),
            color: false,
            spinner: None,
        }
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

impl<W: Write> Console<W> {
    /// Start a spinner on stderr; no-op when stderr is not a terminal
    pub fn start_spinner(&mut self, msg: &str) {
        if !std::io::stderr().is_terminal() {
            return;
        }
        let pb = spinner(msg);
        self.spinner = Some(pb);
    }

    pub fn set_spinner_message(&self, msg: String) {
        if let Some(ref pb) = self.spinner {
            pb.set_message(msg);
        }
    }

    pub fn finish_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    pub fn line(&mut self, text: &str) -> std::io::Result<()> {
        let out = &mut self.out;
        match self.spinner {
            Some(ref pb) => pb.suspend(|| writeln!(out, "{text}")),
            None => writeln!(out, "{text}"),
        }
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.color {
            format!("{}{text}{}", SetForegroundColor(color), ResetColor)
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            format!(
                "{}{text}{}",
                SetAttribute(Attribute::Bold),
                SetAttribute(Attribute::Reset)
            )
        } else {
            text.to_string()
        }
    }

    fn marker(&self) -> String {
        self.paint(MARKER, "==>")
    }

    /// `==> Cloning N repositories:` followed by one pending line per job
    pub fn header(&mut self, pending: &[String]) -> std::io::Result<()> {
        let line = format!(
            "{} {}",
            self.marker(),
            self.bold(&format!("Cloning {} repositories:", pending.len()))
        );
        self.line(&line)?;
        for name in pending {
            let line = format!("{name} {}", self.paint(DIM, "..."));
            self.line(&line)?;
        }
        Ok(())
    }

    /// `<url> (<succeeded>/<total>)`
    pub fn progress(&mut self, url: &str, succeeded: usize, total: usize) -> std::io::Result<()> {
        let line = format!(
            "{url} {}",
            self.paint(OK, &format!("({succeeded}/{total})"))
        );
        self.line(&line)
    }

    pub fn separator(&mut self) -> std::io::Result<()> {
        let line = self.paint(DIM, &"=".repeat(SEPARATOR_WIDTH));
        self.line(&line)
    }

    /// Summary line, then the failed repositories (with details when `verbose`)
    pub fn summary(&mut self, report: &FinalReport, verbose: bool) -> std::io::Result<()> {
        let line = format!("{} {}", self.marker(), summary_text(report));
        self.line(&line)?;

        if report.failures.is_empty() {
            return Ok(());
        }

        let line = self.paint(FAIL, "following repositories are not cloned:");
        self.line(&line)?;
        for failed in &report.failures {
            let name = if verbose && failed.source != failed.display_url {
                format!("{} ({})", failed.display_url, failed.source)
            } else {
                failed.display_url.clone()
            };
            let line = self.paint(FAIL, &name);
            self.line(&line)?;
            if verbose {
                for detail in failed.error.detail().lines() {
                    let line = self.paint(DIM, &format!("    {detail}"));
                    self.line(&line)?;
                }
            }
        }
        Ok(())
    }
}

/// Summary wording depends on how many repositories made it
pub fn summary_text(report: &FinalReport) -> String {
    let (s, t) = (report.succeeded, report.total);
    if t == 0 {
        format!("No repositories to clone ({s}/{t})")
    } else if s == t {
        format!("All repositories have successfully cloned ({s}/{t})")
    } else if s > 1 {
        format!("some repositories have successfully cloned ({s}/{t})")
    } else if s == 1 {
        format!("one repository has successfully cloned ({s}/{t})")
    } else {
        format!("({s}/{t}) repositories are successfully cloned.")
    }
}

/// Create a spinner for long operations
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("◐◓◑◒ ")
            .template("   {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(150));
    pb
}
