use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::order::OrderError;

/// Boundary to the downstream mapper. The batch runner only sees this
/// contract: rendered order in, combined output text out, non-zero exit
/// reported as a dispatch error.
pub trait Dispatch {
    fn dispatch(&self, artifact: &Path, keep_log: bool) -> Result<String, OrderError>;
}

/// Runs the external mapper executable with the rendered order on stdin.
#[derive(Debug)]
pub struct MapperDispatcher {
    mapper: PathBuf,
}

impl MapperDispatcher {
    pub fn new<P: Into<PathBuf>>(mapper: P) -> Self {
        Self {
            mapper: mapper.into(),
        }
    }
}

impl Dispatch for MapperDispatcher {
    fn dispatch(&self, artifact: &Path, keep_log: bool) -> Result<String, OrderError> {
        let input = File::open(artifact).map_err(|e| {
            OrderError::Dispatch(format!("opening [{}]: {}", artifact.display(), e))
        })?;

        let mut command = Command::new(&self.mapper);
        if keep_log {
            command.arg("--keep-log");
        }

        let output = command
            .stdin(Stdio::from(input))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                OrderError::Dispatch(format!("running [{}]: {}", self.mapper.display(), e))
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(OrderError::Dispatch(format!(
                "[{}] exited with {}: {}",
                self.mapper.display(),
                output.status,
                text.trim()
            )));
        }

        Ok(text)
    }
}
