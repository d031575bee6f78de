use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum ReportMode {
    Auto,
    Rich,
    Plain,
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedReportMode {
    Rich,
    Plain,
    Quiet,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportConfig {
    pub mode: ReportMode,
    tty_override: Option<bool>,
}

impl ReportConfig {
    pub fn new(mode: ReportMode) -> Self {
        Self {
            mode,
            tty_override: None,
        }
    }

    #[cfg(test)]
    pub fn with_tty_override(mut self, is_tty: bool) -> Self {
        self.tty_override = Some(is_tty);
        self
    }

    pub fn resolve_mode(self) -> ResolvedReportMode {
        self.mode.resolve(
            self.tty_override
                .unwrap_or_else(|| std::io::stderr().is_terminal()),
        )
    }
}

impl ReportMode {
    fn resolve(self, stderr_is_tty: bool) -> ResolvedReportMode {
        match self {
            ReportMode::Auto => {
                if stderr_is_tty {
                    ResolvedReportMode::Rich
                } else {
                    ResolvedReportMode::Plain
                }
            }
            ReportMode::Rich => ResolvedReportMode::Rich,
            ReportMode::Plain => ResolvedReportMode::Plain,
            ReportMode::Quiet => ResolvedReportMode::Quiet,
        }
    }
}

/// Console reporting for the sequential verifier checks: one spinner per
/// check on a TTY, plain stderr lines otherwise.
pub struct Reporter {
    mode: ResolvedReportMode,
    spinner: Option<ProgressBar>,
}

impl Reporter {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            mode: config.resolve_mode(),
            spinner: None,
        }
    }

    pub fn begin(&mut self, label: &str) {
        match self.mode {
            ResolvedReportMode::Rich => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::with_template("{spinner:.yellow} {msg}")
                        .expect("valid check template")
                        .tick_chars("|/-\\ "),
                );
                pb.enable_steady_tick(Duration::from_millis(120));
                pb.set_message(format!("{}: running", label));
                self.spinner = Some(pb);
            }
            ResolvedReportMode::Plain => eprintln!("[CHECK] {}: running", label),
            ResolvedReportMode::Quiet => {}
        }
    }

    pub fn note(&self, message: &str) {
        match (&self.mode, &self.spinner) {
            (ResolvedReportMode::Quiet, _) => {}
            (_, Some(pb)) => pb.suspend(|| println!("  {}", message)),
            _ => println!("  {}", message),
        }
    }

    pub fn finish(&mut self, label: &str, verdict: &str) {
        match self.mode {
            ResolvedReportMode::Rich => {
                if let Some(pb) = self.spinner.take() {
                    pb.finish_and_clear();
                }
                println!("{}: {}", label, verdict);
            }
            ResolvedReportMode::Plain => println!("{}: {}", label, verdict),
            ResolvedReportMode::Quiet => {}
        }
    }
}
