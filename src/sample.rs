//! The sample sequence read from the program's standard output.

use std::{num::ParseFloatError, ops::Deref, str::FromStr};
use ndarray::Array1;
use pyo3::{Bound, Python};
use numpy::PyArray1;

use crate::plot::Data;

/// A line of output that is not a floating-point literal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: could not convert string to float: {text:?}")]
pub struct ParseError {
    /// 1-based line number within the captured output.
    pub line: usize,
    pub text: String,
    #[source]
    pub source: ParseFloatError,
}

/// The values printed by the program, one per non-blank line, in
/// output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples(Vec<f64>);

impl Samples {
    /// Parse `text` as one float per line.  Blank lines are skipped and
    /// surrounding whitespace (including a `\r` left by CRLF line
    /// endings) is ignored.
    pub fn parse(text: &str) -> Result<Samples, ParseError> {
        let mut values = Vec::new();
        for (i, line) in text.split('\n').enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let v = trimmed.parse::<f64>().map_err(|source| ParseError {
                line: i + 1,
                text: trimmed.to_string(),
                source,
            })?;
            values.push(v);
        }
        Ok(Samples(values))
    }

    /// The x coordinate of every sample: `0, 1, …, len - 1`.
    pub fn index_axis(&self) -> Array1<f64> {
        Array1::range(0., self.0.len() as f64, 1.)
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for Samples {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl FromStr for Samples {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Samples::parse(s)
    }
}

impl From<Vec<f64>> for Samples {
    fn from(values: Vec<f64>) -> Self {
        Samples(values)
    }
}

impl Data for Samples {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.0.to_numpy(py)
    }
}
