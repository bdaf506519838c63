use std::path::PathBuf;

use crate::runner::ExternalProgram;

pub const DEFAULT_PROGRAM: &str = "go";
pub const DEFAULT_ARGS: [&str; 2] = ["run", "main.go"];
pub const DEFAULT_OUTPUT: &str = "go_output_plot.png";

/// What to run and where to save the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub program: ExternalProgram,
    pub output: PathBuf,
}

impl Default for Config {
    /// `go run main.go` in the working directory, charted to
    /// `go_output_plot.png`.
    fn default() -> Self {
        Config {
            program: ExternalProgram::new(DEFAULT_PROGRAM, DEFAULT_ARGS),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Override the command line; an empty `command` keeps the default.
    pub fn with_command(mut self, command: &[String]) -> Self {
        if let Some((program, args)) = command.split_first() {
            self.program = ExternalProgram::new(program.as_str(), args.iter().cloned());
        }
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}
