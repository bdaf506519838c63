//! Run `go run main.go` (or the given command), plot the numbers it
//! prints and save the chart to `go_output_plot.png`.
//!
//! ```bash
//! runplot
//! runplot -o solution.png -- ./solver --steps 20
//! ```

use std::{io::{self, Write}, path::PathBuf, process::ExitCode};
use clap::Parser;
use log::{debug, error};
use runplot::{report, Config, Samples};

#[derive(Parser)]
#[command(name = "runplot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Chart file to write (replaced if it exists)
    #[arg(short, long, value_name = "FILE", default_value = runplot::config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Program and arguments to run [default: go run main.go]
    #[arg(last = true, value_name = "COMMAND")]
    command: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)).init();

    let config = Config::default()
        .with_command(&cli.command)
        .with_output(cli.output);

    if finish(&mut io::stdout().lock(), &config, runplot::run(&config)) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print the summary or the diagnostic to `out`.  Return `true` only if
/// the run succeeded and its summary was written.
fn finish<W: Write>(out: &mut W, config: &Config,
                    result: Result<Samples, runplot::Error>) -> bool {
    match result {
        Ok(samples) => {
            if let Err(e) = report::write_summary(
                out, &config.program, &config.output, &samples) {
                error!("chart saved to {} but the summary could not be \
                        written: {}", config.output.display(), e);
                return false;
            }
            true
        }
        Err(e) => {
            debug!("{:?}", e);
            if let Err(w) = report::write_diagnostic(out, &e) {
                error!("{} (cannot write diagnostic: {})", e, w);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runplot::runner::RunError;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    #[test]
    fn success_prints_summary() {
        let mut out = Vec::new();
        assert!(finish(&mut out, &Config::default(),
                       Ok(Samples::from(vec![1., 2.5]))));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  Point 1: 2.5"));
    }

    #[test]
    fn unwritable_summary_fails() {
        assert!(!finish(&mut Closed, &Config::default(),
                        Ok(Samples::from(vec![1.]))));
    }

    #[test]
    fn diagnostic_goes_to_the_same_stream() {
        let mut out = Vec::new();
        let err = RunError::NotFound { program: "go".into() }.into();
        assert!(!finish(&mut out, &Config::default(), Err(err)));
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Error: The 'go' command was not found."));
    }
}
