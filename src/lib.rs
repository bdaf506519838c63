//! Run a program, read the numbers it prints (one per line) and chart
//! them with [Matplotlib][].
//!
//! Usage
//! -----
//!
//! ```no_run
//! let config = runplot::Config::default(); // go run main.go
//! let samples = runplot::run(&config)?;
//! println!("{} points", samples.len());
//! # Ok::<(), runplot::Error>(())
//! ```
//!
//! The chart is drawn through [`plot`], a small binding to Matplotlib's
//! object-oriented API, so a Python interpreter with the `matplotlib`
//! package must be available at run time.
//!
//! [Matplotlib]: https://matplotlib.org/

pub mod chart;
pub mod config;
mod error;
pub mod plot;
pub mod report;
pub mod runner;
pub mod sample;

use log::debug;

pub use config::Config;
pub use error::{Error, ErrorKind};
pub use runner::ExternalProgram;
pub use sample::Samples;

/// Run the configured program, parse its output and save the chart.
///
/// Nothing is written to `config.output` unless the program succeeded
/// and every line of its output was a number.
pub fn run(config: &Config) -> Result<Samples, Error> {
    let captured = config.program.capture()?;
    let samples = Samples::parse(&captured.stdout)?;
    debug!("parsed {} samples", samples.len());
    chart::render(&samples, &config.output)?;
    Ok(samples)
}
