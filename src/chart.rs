//! The chart layout: one blue line with circle markers over a dashed
//! grid, a tick at every sample index.

use std::path::Path;
use log::info;

use crate::{plot::{self, Axes, Figure}, sample::Samples};

pub const FIGSIZE: (f64, f64) = (12., 7.);
pub const TITLE: &str = "Data Plot from Program Output";
pub const XLABEL: &str = "Data Point Index";
pub const YLABEL: &str = "Value";
const TITLE_FONTSIZE: f64 = 16.;
const LABEL_FONTSIZE: f64 = 12.;

/// Draw `samples` against their index on a new figure.
pub fn draw(samples: &Samples) -> Result<(Figure, Axes), plot::Error> {
    let fig = Figure::new(FIGSIZE.0, FIGSIZE.1)?;
    let mut ax = fig.subplot()?;
    ax.y(samples).marker("o").linestyle("-").color("b").plot()?;
    ax.set_title(TITLE, TITLE_FONTSIZE)?
        .set_xlabel(XLABEL, LABEL_FONTSIZE)?
        .set_ylabel(YLABEL, LABEL_FONTSIZE)?
        .grid("both", "--", 0.5)?
        .set_xticks(&samples.index_axis())?;
    Ok((fig, ax))
}

/// Draw `samples` and save the chart to `path`, replacing any file
/// already there.
pub fn render(samples: &Samples, path: &Path) -> Result<(), plot::Error> {
    let (fig, _) = draw(samples)?;
    fig.savefig(path)?;
    info!("saved chart of {} points to {}", samples.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_styling() -> Result<(), Box<dyn std::error::Error>> {
        if !plot::is_available() {
            eprintln!("matplotlib not installed, skipping");
            return Ok(())
        }
        let (fig, ax) = draw(&Samples::from(vec![10., 7.5, 4.2, 1.]))?;
        assert_eq!(fig.size_inches()?, (12., 7.));
        assert_eq!(ax.title()?, "Data Plot from Program Output");
        assert_eq!(ax.xlabel()?, "Data Point Index");
        assert_eq!(ax.ylabel()?, "Value");
        assert_eq!(ax.xticks()?, vec![0., 1., 2., 3.]);
        let lines = ax.lines()?;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].marker, "o");
        assert_eq!(lines[0].linestyle, "-");
        assert_eq!(lines[0].color, "b");
        assert_eq!(lines[0].ydata, vec![10., 7.5, 4.2, 1.]);
        Ok(())
    }

    #[test]
    fn no_ticks_without_samples() -> Result<(), Box<dyn std::error::Error>> {
        if !plot::is_available() {
            eprintln!("matplotlib not installed, skipping");
            return Ok(())
        }
        let (_, ax) = draw(&Samples::default())?;
        assert!(ax.xticks()?.is_empty());
        assert!(ax.lines()?[0].ydata.is_empty());
        Ok(())
    }

    #[test]
    fn writes_png() -> Result<(), Box<dyn std::error::Error>> {
        if !plot::is_available() {
            eprintln!("matplotlib not installed, skipping");
            return Ok(())
        }
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("chart.png");
        render(&Samples::from(vec![10., 7.5, 4.2, 1.]), &path)?;
        let bytes = std::fs::read(&path)?;
        assert!(bytes.starts_with(b"\x89PNG"));
        Ok(())
    }

    #[test]
    fn overwrites_existing_file() -> Result<(), Box<dyn std::error::Error>> {
        if !plot::is_available() {
            eprintln!("matplotlib not installed, skipping");
            return Ok(())
        }
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("chart.png");
        std::fs::write(&path, b"stale")?;
        render(&Samples::from(vec![1., 2.]), &path)?;
        assert!(std::fs::read(&path)?.starts_with(b"\x89PNG"));
        Ok(())
    }

    #[test]
    fn empty_samples_give_empty_plot() -> Result<(), Box<dyn std::error::Error>> {
        if !plot::is_available() {
            eprintln!("matplotlib not installed, skipping");
            return Ok(())
        }
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empty.png");
        render(&Samples::default(), &path)?;
        assert!(path.is_file());
        Ok(())
    }
}
