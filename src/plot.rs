//! Thin bindings to the [Matplotlib][] object-oriented API.
//!
//! Only what the chart needs is exposed: a [`Figure`] with a given
//! size, a single set of [`Axes`], a line plot with its style options,
//! titles, labels, grid, ticks, and saving to a file.  Figures are
//! created through `matplotlib.figure` rather than `pyplot`, so no GUI
//! backend is ever selected and rendering works headless.
//!
//! [Matplotlib]: https://matplotlib.org/

use std::path::Path;
use lazy_static::lazy_static;
use ndarray::Array1;
use numpy::{PyArray1, ToPyArray};
use pyo3::{
    prelude::*,
    exceptions::{PyFileNotFoundError, PyPermissionError, PyValueError},
    types::{PyDict, PyModule},
};

/// Possible errors of the Matplotlib bindings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    #[error("the matplotlib library has not been found; \
             see https://matplotlib.org/ to install it")]
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    #[error("a path contains an element that is not a directory or \
             does not exist")]
    FileNotFound,
    /// Permission denied to access or create the filesystem path.
    #[error("permission denied to access or create the filesystem path")]
    Permission,
    /// Other Python errors.
    #[error("Python error: {0}")]
    Python(#[from] PyErr),
}

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(|m| m.unbind()))
}}

lazy_static! {
    static ref FIGURE: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.figure")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}

/// Call the method `$m` of `$obj` with positional `$args` (which may
/// use `$py`) and the keyword arguments filled in by `$kwargs`.
macro_rules! meth {
    ($obj: expr, $m: ident, $py: ident -> $args: expr,
     $kw: ident -> $kwargs: block) => {
        Python::with_gil(|$py| -> Result<(), Error> {
            let $kw = PyDict::new_bound($py);
            $kwargs
            $obj.bind($py).call_method(stringify!($m), $args, Some(&$kw))?;
            Ok(())
        })
    };
    ($obj: expr, $m: ident, $py: ident -> $args: expr) => {
        Python::with_gil(|$py| -> Result<(), Error> {
            $obj.bind($py).call_method1(stringify!($m), $args)?;
            Ok(())
        })
    };
}

/// Call the getter `$m` of `$obj` and extract its value, optionally
/// converting a numpy array with `$conv` (e.g. `tolist`) first.
macro_rules! getter {
    ($obj: expr, $m: ident) => {
        Python::with_gil(|py| -> Result<_, Error> {
            Ok($obj.bind(py).call_method0(stringify!($m))?.extract()?)
        })
    };
    ($obj: expr, $m: ident, $conv: ident) => {
        Python::with_gil(|py| -> Result<_, Error> {
            Ok($obj.bind(py).call_method0(stringify!($m))?
               .call_method0(stringify!($conv))?.extract()?)
        })
    };
}

/// Return `true` if Matplotlib can be imported.
pub fn is_available() -> bool {
    FIGURE.is_ok()
}

/// Data that can be handed to Matplotlib as a `numpy.ndarray`.
pub trait Data {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>>;
}

impl Data for [f64] {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self)
    }
}

impl Data for Vec<f64> {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.as_slice().to_numpy(py)
    }
}

impl Data for Array1<f64> {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.to_pyarray_bound(py)
    }
}

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

#[derive(Debug, Clone)]
pub struct Axes {
    ax: PyObject,
}

impl Figure {
    /// Return a new `Figure` of `width` × `height` inches.
    ///
    /// Return an error if Matplotlib is not present on the system.
    pub fn new(width: f64, height: f64) -> Result<Figure, Error> {
        let figure = pymod!(FIGURE)?;
        Python::with_gil(|py| -> Result<Figure, Error> {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("figsize", (width, height))?;
            let fig = figure.bind(py).getattr("Figure")?
                .call((), Some(&kwargs))?;
            Ok(Figure { fig: fig.unbind() })
        })
    }

    /// Add a single set of axes filling the figure.
    pub fn subplot(&self) -> Result<Axes, Error> {
        Python::with_gil(|py| -> Result<Axes, Error> {
            let ax = self.fig.bind(py).call_method0("add_subplot")?;
            Ok(Axes { ax: ax.unbind() })
        })
    }

    /// Save the figure to `path`.  The format is deduced from the
    /// extension and an existing file is overwritten.
    pub fn savefig(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        Python::with_gil(|py| -> Result<(), Error> {
            self.fig.bind(py)
                .call_method1("savefig", (path.as_ref(),))
                .map_err(|e| {
                    if e.is_instance_of::<PyFileNotFoundError>(py) {
                        Error::FileNotFound
                    } else if e.is_instance_of::<PyPermissionError>(py) {
                        Error::Permission
                    } else {
                        Error::Python(e)
                    }
                })?;
            Ok(())
        })
    }

    /// The figure size in inches, `(width, height)`.
    pub fn size_inches(&self) -> Result<(f64, f64), Error> {
        let size: Vec<f64> = getter!(self.fig, get_size_inches, tolist)?;
        match size[..] {
            [w, h] => Ok((w, h)),
            _ => Err(Error::Python(PyValueError::new_err(
                format!("unexpected figure size {:?}", size)))),
        }
    }
}

/// The style and data of a line already drawn on some [`Axes`].
#[derive(Debug, Clone, PartialEq)]
pub struct Line2D {
    pub marker: String,
    pub linestyle: String,
    pub color: String,
    pub ydata: Vec<f64>,
}

impl Axes {
    /// Plot `y` versus its indices as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use runplot::plot::Figure;
    /// let fig = Figure::new(6.4, 4.8)?;
    /// let mut ax = fig.subplot()?;
    /// ax.y(&vec![1., 4., 2., 3.]).marker("o").plot()?;
    /// fig.savefig("target/Y_plot.pdf")?;
    /// # Ok::<(), runplot::plot::Error>(())
    /// ```
    #[must_use]
    pub fn y<'a, D>(&'a mut self, y: &'a D) -> Line<'a, D>
    where D: Data + ?Sized {
        // Mutably borrow `self` to reflect that the final `.plot()`
        // mutates the underlying Python object.
        Line { axes: self,
               options: LineOptions::default(),
               y }
    }

    pub fn set_title(&mut self, title: &str, fontsize: f64)
                     -> Result<&mut Self, Error> {
        meth!(self.ax, set_title, _py -> (title,), kw -> {
            kw.set_item("fontsize", fontsize)?;
        })?;
        Ok(self)
    }

    pub fn set_xlabel(&mut self, label: &str, fontsize: f64)
                      -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlabel, _py -> (label,), kw -> {
            kw.set_item("fontsize", fontsize)?;
        })?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str, fontsize: f64)
                      -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylabel, _py -> (label,), kw -> {
            kw.set_item("fontsize", fontsize)?;
        })?;
        Ok(self)
    }

    /// Turn the grid on.  `which` is one of "major", "minor" or "both".
    pub fn grid(&mut self, which: &str, linestyle: &str, linewidth: f64)
                -> Result<&mut Self, Error> {
        meth!(self.ax, grid, _py -> (true,), kw -> {
            kw.set_item("which", which)?;
            kw.set_item("linestyle", linestyle)?;
            kw.set_item("linewidth", linewidth)?;
        })?;
        Ok(self)
    }

    /// Put a tick on the x-axis at each of the positions `ticks`.
    pub fn set_xticks<D>(&mut self, ticks: &D) -> Result<&mut Self, Error>
    where D: Data + ?Sized {
        meth!(self.ax, set_xticks, py -> (ticks.to_numpy(py),))?;
        Ok(self)
    }

    pub fn title(&self) -> Result<String, Error> {
        getter!(self.ax, get_title)
    }

    pub fn xlabel(&self) -> Result<String, Error> {
        getter!(self.ax, get_xlabel)
    }

    pub fn ylabel(&self) -> Result<String, Error> {
        getter!(self.ax, get_ylabel)
    }

    pub fn xticks(&self) -> Result<Vec<f64>, Error> {
        getter!(self.ax, get_xticks, tolist)
    }

    /// The lines drawn so far, in drawing order.
    pub fn lines(&self) -> Result<Vec<Line2D>, Error> {
        Python::with_gil(|py| -> Result<Vec<Line2D>, Error> {
            let mut lines = Vec::new();
            for l in self.ax.bind(py).call_method0("get_lines")?.iter()? {
                let l = l?;
                lines.push(Line2D {
                    marker: l.call_method0("get_marker")?.extract()?,
                    linestyle: l.call_method0("get_linestyle")?.extract()?,
                    color: l.call_method0("get_color")?.extract()?,
                    ydata: l.call_method0("get_ydata")?
                        .call_method0("tolist")?.extract()?,
                });
            }
            Ok(lines)
        })
    }
}

#[derive(Clone, Default)]
struct LineOptions<'a> {
    marker: Option<&'a str>,
    linestyle: Option<&'a str>,
    color: Option<&'a str>,
}

impl LineOptions<'_> {
    fn kwargs(&self, kwargs: &Bound<'_, PyDict>) -> PyResult<()> {
        if let Some(m) = self.marker {
            kwargs.set_item("marker", m)?
        }
        if let Some(s) = self.linestyle {
            kwargs.set_item("linestyle", s)?
        }
        if let Some(c) = self.color {
            kwargs.set_item("color", c)?
        }
        Ok(())
    }
}

/// A pending line plot.  Set options, then call [`Line::plot`].
#[must_use]
pub struct Line<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    options: LineOptions<'a>,
    y: &'a D,
}

impl<'a, D> Line<'a, D>
where D: Data + ?Sized {
    /// Marker style, e.g. "o", ".", "x".
    pub fn marker(mut self, marker: &'a str) -> Self {
        self.options.marker = Some(marker);
        self
    }

    /// Line style, e.g. "-", "--", ":".
    pub fn linestyle(mut self, linestyle: &'a str) -> Self {
        self.options.linestyle = Some(linestyle);
        self
    }

    pub fn color(mut self, color: &'a str) -> Self {
        self.options.color = Some(color);
        self
    }

    /// Plot the data with the options specified in [`Line`].
    pub fn plot(self) -> Result<(), Error> {
        meth!(self.axes.ax, plot, py -> (self.y.to_numpy(py),), kw -> {
            self.options.kwargs(&kw)?;
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_basic_png() -> Result<(), Box<dyn std::error::Error>> {
        if !is_available() {
            eprintln!("matplotlib not installed, skipping");
            return Ok(())
        }
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("a_basic.png");
        let fig = Figure::new(6.4, 4.8)?;
        let mut ax = fig.subplot()?;
        ax.y(&vec![1., 4., 2., 3.]).marker("o").linestyle("-").color("b")
            .plot()?;
        ax.set_title("basic", 16.)?
            .set_xlabel("x", 12.)?
            .set_ylabel("y", 12.)?
            .grid("both", "--", 0.5)?;
        fig.savefig(&path)?;
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn read_back_axes() -> Result<(), Box<dyn std::error::Error>> {
        if !is_available() {
            eprintln!("matplotlib not installed, skipping");
            return Ok(())
        }
        let fig = Figure::new(3., 2.)?;
        let mut ax = fig.subplot()?;
        ax.y(&vec![5., 6.]).marker("x").linestyle(":").color("r").plot()?;
        ax.set_title("t", 10.)?.set_xlabel("a", 8.)?.set_ylabel("b", 8.)?
            .set_xticks(&vec![0., 1.])?;
        assert_eq!(fig.size_inches()?, (3., 2.));
        assert_eq!(ax.title()?, "t");
        assert_eq!(ax.xlabel()?, "a");
        assert_eq!(ax.ylabel()?, "b");
        assert_eq!(ax.xticks()?, vec![0., 1.]);
        assert_eq!(ax.lines()?, vec![Line2D {
            marker: "x".into(), linestyle: ":".into(), color: "r".into(),
            ydata: vec![5., 6.] }]);
        Ok(())
    }

    #[test]
    fn empty_data_and_ticks() -> Result<(), Box<dyn std::error::Error>> {
        if !is_available() {
            eprintln!("matplotlib not installed, skipping");
            return Ok(())
        }
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empty.png");
        let fig = Figure::new(6.4, 4.8)?;
        let mut ax = fig.subplot()?;
        let y: Vec<f64> = vec![];
        ax.y(&y).plot()?;
        ax.set_xticks(&Array1::<f64>::zeros(0))?;
        fig.savefig(&path)?;
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn save_into_missing_directory() -> Result<(), Box<dyn std::error::Error>> {
        if !is_available() {
            eprintln!("matplotlib not installed, skipping");
            return Ok(())
        }
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("no").join("such").join("dir.png");
        let fig = Figure::new(6.4, 4.8)?;
        fig.subplot()?;
        assert!(matches!(fig.savefig(&path), Err(Error::FileNotFound)));
        Ok(())
    }

    #[test]
    fn missing_matplotlib_is_reported() {
        if is_available() { return }
        assert!(matches!(Figure::new(1., 1.), Err(Error::NoMatplotlib)));
    }
}
