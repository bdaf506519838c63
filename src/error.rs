use crate::{plot, runner::RunError, sample::ParseError};

/// The category of a failed run.  Every category ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The external program, or the Matplotlib runtime, is missing.
    Environment,
    /// The external program exited with a failure status.
    Execution,
    /// The output is not one float per non-blank line, or is not text.
    InputFormat,
    /// Anything else: the program could not be started, or the chart
    /// could not be drawn or saved.
    Unexpected,
}

/// Any failure of [`run`](crate::run), wrapping the error of the step
/// that failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Plot(#[from] plot::Error),
}

impl Error {
    /// The category used to report this error to the user.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Run(RunError::NotFound { .. }) => ErrorKind::Environment,
            Error::Run(RunError::Failed { .. }) => ErrorKind::Execution,
            Error::Run(RunError::Encoding { .. }) => ErrorKind::InputFormat,
            Error::Run(RunError::Spawn { .. }) => ErrorKind::Unexpected,
            Error::Parse(_) => ErrorKind::InputFormat,
            Error::Plot(plot::Error::NoMatplotlib) => ErrorKind::Environment,
            Error::Plot(_) => ErrorKind::Unexpected,
        }
    }
}
