use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use orchestrator::TriggeredRun;

/// Where the step outputs `run-id` and `run-url` go.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget {
    /// `name=value` lines appended to the file named by `GITHUB_OUTPUT`.
    File(PathBuf),
    /// Legacy `::set-output` workflow commands on stdout.
    Stdout,
}

impl OutputTarget {
    pub fn from_env() -> Self {
        match std::env::var_os("GITHUB_OUTPUT") {
            Some(path) if !path.is_empty() => OutputTarget::File(PathBuf::from(path)),
            _ => OutputTarget::Stdout,
        }
    }

    pub fn write(&self, run: &TriggeredRun) -> io::Result<()> {
        let outputs = [("run-id", run.id.as_str()), ("run-url", run.url.as_str())];
        match self {
            OutputTarget::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                for (name, value) in outputs {
                    writeln!(file, "{}={}", name, value)?;
                }
            }
            OutputTarget::Stdout => {
                let mut stdout = io::stdout().lock();
                for (name, value) in outputs {
                    writeln!(stdout, "::set-output name={}::{}", name, value)?;
                }
            }
        }
        Ok(())
    }
}
