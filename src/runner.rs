//! Launch the external program and capture what it prints.

use std::{
    fmt::{self, Display, Formatter},
    io,
    process::{Command, ExitStatus, Stdio},
    string::FromUtf8Error,
};
use log::{debug, info, warn};

/// Failure to obtain the output of the external program.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The executable is not on the search path.
    #[error("the '{program}' command was not found")]
    NotFound { program: String },
    /// The program ran but reported failure.
    #[error("`{command}` returned non-zero {status}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    /// The program could not be started for another reason.
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` wrote non-UTF-8 text to its standard output")]
    Encoding {
        command: String,
        #[source]
        source: FromUtf8Error,
    },
}

/// Text captured from a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
}

/// A program and its arguments, run in the current working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProgram {
    program: String,
    args: Vec<String>,
}

impl ExternalProgram {
    pub fn new<S, I, A>(program: S, args: I) -> Self
    where S: Into<String>,
          I: IntoIterator<Item = A>,
          A: Into<String> {
        ExternalProgram {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the program to completion, blocking until it exits.
    ///
    /// Stdin is closed; stdout and stderr are captured.  A non-zero
    /// exit status (or termination by a signal) is an error carrying
    /// the captured stderr.
    pub fn capture(&self) -> Result<Captured, RunError> {
        info!("running `{}`", self);
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => RunError::NotFound {
                    program: self.program.clone(),
                },
                _ => RunError::Spawn { command: self.to_string(), source: e },
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            debug!("`{}` failed with {}: {}", self, output.status, stderr);
            return Err(RunError::Failed {
                command: self.to_string(),
                status: output.status,
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            warn!("`{}` succeeded but wrote to stderr", self);
            debug!("stderr of `{}`: {}", self, stderr);
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|source| RunError::Encoding {
                command: self.to_string(),
                source,
            })?;
        debug!("captured {} bytes of output", stdout.len());
        Ok(Captured { stdout, stderr })
    }
}

impl Display for ExternalProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for a in &self.args {
            write!(f, " {}", a)?;
        }
        Ok(())
    }
}
