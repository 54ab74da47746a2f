//! Panel specifications handed to a chart renderer.
//!
//! A [`Dashboard`] is plain data: composing one needs no drawing backend, so
//! layout decisions are testable without producing an image.

pub mod plotters_renderer;

use std::path::Path;

use crate::errors::RenderError;

pub use plotters_renderer::PlottersRenderer;

pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

pub const PRIMARY_PALETTE: [Rgb; 4] = [
    Rgb::hex(0x2E86AB),
    Rgb::hex(0xA23B72),
    Rgb::hex(0xF18F01),
    Rgb::hex(0xC73E1D),
];

pub const SECONDARY_PALETTE: [Rgb; 4] = [
    Rgb::hex(0x4E9F3D),
    Rgb::hex(0x191A19),
    Rgb::hex(0x1E5128),
    Rgb::hex(0xD8E9A8),
];

/// Labelled values, one bar or slice per entry
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

impl FromIterator<(String, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let (labels, values) = iter.into_iter().unzip();
        Self { labels, values }
    }
}

/// Least-squares line `y = slope * x + intercept`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Degree-1 least-squares fit; `None` for fewer than two points or when
/// every x is the same.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for &(x, y) in points {
        sxy += (x - mean_x) * (y - mean_y);
        sxx += (x - mean_x) * (x - mean_x);
    }
    if sxx.abs() < f64::EPSILON {
        return None;
    }

    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// How axis values are printed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Currency,
    Count,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Chart {
    HorizontalBar(Series),
    Bar(Series),
    Pie(Series),
    /// `placeholder` marks series that are not derived from stored data
    Line { series: Series, placeholder: bool },
    Scatter {
        points: Vec<(f64, f64)>,
        fit: Option<LinearFit>,
    },
    Text(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub value_kind: ValueKind,
    pub colors: Vec<Rgb>,
    pub chart: Chart,
}

impl PanelSpec {
    pub fn new(title: impl Into<String>, chart: Chart) -> Self {
        Self {
            title: title.into(),
            x_label: None,
            y_label: None,
            value_kind: ValueKind::Currency,
            colors: vec![PRIMARY_PALETTE[0]],
            chart,
        }
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn value_kind(mut self, kind: ValueKind) -> Self {
        self.value_kind = kind;
        self
    }

    pub fn colors(mut self, colors: &[Rgb]) -> Self {
        self.colors = colors.to_vec();
        self
    }

    /// Colour for the `index`-th element, cycling through the panel palette
    pub fn color(&self, index: usize) -> Rgb {
        if self.colors.is_empty() {
            PRIMARY_PALETTE[0]
        } else {
            self.colors[index % self.colors.len()]
        }
    }
}

/// Fixed grid of optional panels; `None` leaves a cell blank
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub panels: Vec<Option<PanelSpec>>,
}

impl Dashboard {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            panels: vec![None; GRID_ROWS * GRID_COLS],
        }
    }

    /// Places a panel at `(row, col)`; out-of-grid positions are ignored
    pub fn place(&mut self, row: usize, col: usize, panel: Option<PanelSpec>) {
        if row < GRID_ROWS && col < GRID_COLS {
            self.panels[row * GRID_COLS + col] = panel;
        }
    }

    pub fn panel(&self, row: usize, col: usize) -> Option<&PanelSpec> {
        if row < GRID_ROWS && col < GRID_COLS {
            self.panels[row * GRID_COLS + col].as_ref()
        } else {
            None
        }
    }

    pub fn drawn_panels(&self) -> usize {
        self.panels.iter().filter(|p| p.is_some()).count()
    }
}

/// Turns a dashboard into a raster image at `path`
pub trait ChartRenderer: Send + Sync {
    fn render(&self, dashboard: &Dashboard, path: &Path) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_recovers_exact_line() {
        let points = [(1.0, 5.0), (2.0, 7.0), (3.0, 9.0)];
        let fit = linear_fit(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 3.0).abs() < 1e-9);
        assert!((fit.at(10.0) - 23.0).abs() < 1e-9);
    }

    #[test]
    fn fit_needs_spread() {
        assert_eq!(linear_fit(&[(1.0, 2.0)]), None);
        assert_eq!(linear_fit(&[(4.0, 2.0), (4.0, 9.0)]), None);
    }

    #[test]
    fn palette_hex_decoding() {
        assert_eq!(PRIMARY_PALETTE[0], Rgb(0x2E, 0x86, 0xAB));
        assert_eq!(SECONDARY_PALETTE[3], Rgb(0xD8, 0xE9, 0xA8));
    }

    #[test]
    fn placement_stays_in_grid() {
        let mut dashboard = Dashboard::new("t", 100, 100);
        dashboard.place(2, 2, Some(PanelSpec::new("x", Chart::Text(vec![]))));
        dashboard.place(3, 0, Some(PanelSpec::new("y", Chart::Text(vec![]))));
        assert_eq!(dashboard.drawn_panels(), 1);
        assert_eq!(dashboard.panel(2, 2).map(|p| p.title.as_str()), Some("x"));
    }
}
