//! What the user sees on the console.  Both the summary and the
//! diagnostics are meant for standard output; log records go to
//! standard error.

use std::{io::{self, Write}, path::Path};

use crate::{
    error::{Error, ErrorKind},
    runner::{ExternalProgram, RunError},
    sample::Samples,
};

/// Confirmation followed by one `Point i: value` line per sample.
pub fn write_summary<W: Write>(
    w: &mut W, program: &ExternalProgram, output: &Path, samples: &Samples,
) -> io::Result<()> {
    writeln!(w, "Successfully executed `{}` and saved plot to '{}'",
             program, output.display())?;
    writeln!(w)?;
    writeln!(w, "Captured Data:")?;
    for (i, v) in samples.iter().enumerate() {
        writeln!(w, "  Point {}: {:?}", i, v)?;
    }
    Ok(())
}

/// A headline naming the error category, then a hint or the program's
/// error stream.
pub fn write_diagnostic<W: Write>(w: &mut W, err: &Error) -> io::Result<()> {
    match (err.kind(), err) {
        (ErrorKind::Environment, Error::Plot(_)) => {
            writeln!(w, "Error: The matplotlib Python library was not found.")?;
            writeln!(w, "Please install it (see https://matplotlib.org/) for the \
                         Python interpreter this program is linked against.")
        }
        (ErrorKind::Environment, Error::Run(RunError::NotFound { program })) => {
            writeln!(w, "Error: The '{}' command was not found.", program)?;
            writeln!(w, "Please ensure that '{}' is installed and that its \
                         binary is in your system's PATH.", program)
        }
        (ErrorKind::Execution, Error::Run(RunError::Failed { stderr, .. })) => {
            writeln!(w, "Error executing program: {}", err)?;
            writeln!(w, "Stderr: {}", stderr.trim_end())
        }
        (ErrorKind::InputFormat, _) => {
            writeln!(w, "Error parsing the output from the program: {}", err)?;
            writeln!(w, "Please ensure the program outputs only numbers, \
                         one per line.")
        }
        _ => writeln!(w, "An unexpected error occurred: {}", err),
    }
}
