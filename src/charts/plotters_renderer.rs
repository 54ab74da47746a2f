use std::path::Path;

use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use tracing::{debug, info};

use super::{Chart, ChartRenderer, Dashboard, PanelSpec, Series, ValueKind, GRID_COLS, GRID_ROWS};
use crate::common::format_axis_money;
use crate::errors::RenderError;

const FONT: &str = "sans-serif";
const TEXT_PANEL_FONT: &str = "monospace";
const SUMMARY_BOX: RGBColor = RGBColor(211, 211, 211);

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Backend(err.to_string())
    }
}

/// PNG renderer on the plotters bitmap backend
#[derive(Debug, Clone, Default)]
pub struct PlottersRenderer;

impl PlottersRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, dashboard: &Dashboard, path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (dashboard.width, dashboard.height))
            .into_drawing_area();
        root.fill(&WHITE)?;
        let body = root.titled(
            &dashboard.title,
            (FONT, 40).into_font().style(FontStyle::Bold),
        )?;

        let cells = body.split_evenly((GRID_ROWS, GRID_COLS));
        for (cell, panel) in cells.iter().zip(&dashboard.panels) {
            if let Some(panel) = panel {
                debug!(panel = %panel.title, "Drawing panel");
                draw_panel(cell, panel)?;
            }
        }

        root.present()?;
        info!("Dashboard image written to {}", path.display());
        Ok(())
    }
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn rgb(panel: &PanelSpec, index: usize) -> RGBColor {
    let c = panel.color(index);
    RGBColor(c.0, c.1, c.2)
}

fn axis_label(kind: ValueKind, value: f64) -> String {
    match kind {
        ValueKind::Currency => format_axis_money(value),
        ValueKind::Count => format!("{:.0}", value),
    }
}

fn draw_panel(area: &Area<'_>, panel: &PanelSpec) -> Result<(), RenderError> {
    match &panel.chart {
        Chart::Bar(series) => draw_bars(area, panel, series),
        Chart::HorizontalBar(series) => draw_horizontal_bars(area, panel, series),
        Chart::Pie(series) => draw_pie(area, panel, series),
        Chart::Line { series, .. } => draw_line(area, panel, series),
        Chart::Scatter { points, fit } => draw_scatter(area, panel, points, fit.as_ref()),
        Chart::Text(lines) => draw_text(area, lines),
    }
}

fn draw_bars(area: &Area<'_>, panel: &PanelSpec, series: &Series) -> Result<(), RenderError> {
    let n = series.len();
    let top = series.max_value().max(1.0) * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 22).into_font().style(FontStyle::Bold))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..top)?;

    let x_formatter = |x: &SegmentValue<usize>| match x {
        SegmentValue::CenterOf(i) => series.labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    let y_formatter = |y: &f64| axis_label(panel.value_kind, *y);

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter);
    if let Some(label) = &panel.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;

    chart.draw_series(series.values.iter().enumerate().map(|(i, value)| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), *value),
            ],
            rgb(panel, i).mix(0.8).filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    Ok(())
}

fn draw_horizontal_bars(
    area: &Area<'_>,
    panel: &PanelSpec,
    series: &Series,
) -> Result<(), RenderError> {
    let n = series.len();
    let right = series.max_value().max(1.0) * 1.25;
    // First entry is drawn at the top
    let slot = |i: usize| n - 1 - i;

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 22).into_font().style(FontStyle::Bold))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(130)
        .build_cartesian_2d(0f64..right, (0..n).into_segmented())?;

    let x_formatter = |x: &f64| axis_label(panel.value_kind, *x);
    let y_formatter = |y: &SegmentValue<usize>| match y {
        SegmentValue::CenterOf(s) if *s < n => series
            .labels
            .get(slot(*s))
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    };

    let mut mesh = chart.configure_mesh();
    mesh.disable_y_mesh()
        .y_labels(n)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter);
    if let Some(label) = &panel.x_label {
        mesh.x_desc(label.as_str());
    }
    mesh.draw()?;

    chart.draw_series(series.values.iter().enumerate().map(|(i, value)| {
        let s = slot(i);
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(s)),
                (*value, SegmentValue::Exact(s + 1)),
            ],
            rgb(panel, i).mix(0.8).filled(),
        );
        bar.set_margin(6, 6, 0, 0);
        bar
    }))?;

    chart.draw_series(series.values.iter().enumerate().map(|(i, value)| {
        Text::new(
            format!(" {}", axis_label(panel.value_kind, *value)),
            (*value, SegmentValue::CenterOf(slot(i))),
            (FONT, 14).into_font(),
        )
    }))?;

    Ok(())
}

fn draw_pie(area: &Area<'_>, panel: &PanelSpec, series: &Series) -> Result<(), RenderError> {
    let area = area.titled(&panel.title, (FONT, 22).into_font().style(FontStyle::Bold))?;
    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let colors: Vec<RGBColor> = (0..series.len()).map(|i| rgb(panel, i)).collect();
    let mut pie = Pie::new(&center, &radius, &series.values, &colors, &series.labels);
    pie.label_style((FONT, 16).into_font());
    pie.percentages((FONT, 14).into_font().color(&WHITE));
    area.draw(&pie)?;

    Ok(())
}

fn draw_line(area: &Area<'_>, panel: &PanelSpec, series: &Series) -> Result<(), RenderError> {
    let n = series.len();
    let top = series.max_value().max(1.0) * 1.1;
    let color = rgb(panel, 0);
    let points: Vec<(SegmentValue<usize>, f64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (SegmentValue::CenterOf(i), *v))
        .collect();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 22).into_font().style(FontStyle::Bold))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..top)?;

    let x_formatter = |x: &SegmentValue<usize>| match x {
        SegmentValue::CenterOf(i) => series.labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    let y_formatter = |y: &f64| axis_label(panel.value_kind, *y);

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(n)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter);
    if let Some(label) = &panel.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;

    chart.draw_series(AreaSeries::new(points.clone(), 0.0, color.mix(0.3)))?;
    chart.draw_series(LineSeries::new(points, color.stroke_width(2)).point_size(4))?;

    Ok(())
}

fn draw_scatter(
    area: &Area<'_>,
    panel: &PanelSpec,
    points: &[(f64, f64)],
    fit: Option<&super::LinearFit>,
) -> Result<(), RenderError> {
    let x_min = points.iter().map(|p| p.0).fold(f64::MAX, f64::min);
    let x_max = points.iter().map(|p| p.0).fold(f64::MIN, f64::max);
    let (x_min, x_max) = if x_min > x_max {
        (0.0, 1.0)
    } else {
        (x_min, x_max)
    };
    let pad = ((x_max - x_min) * 0.1).max(0.5);
    let (x_lo, x_hi) = (x_min - pad, x_max + pad);
    let y_top = points.iter().map(|p| p.1).fold(0.0, f64::max).max(1.0) * 1.15;
    let color = rgb(panel, 0);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 22).into_font().style(FontStyle::Bold))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_top)?;

    let y_formatter = |y: &f64| axis_label(panel.value_kind, *y);
    let mut mesh = chart.configure_mesh();
    mesh.y_label_formatter(&y_formatter);
    if let Some(label) = &panel.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &panel.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 7, color.mix(0.7).filled())),
    )?;

    if let Some(fit) = fit {
        chart.draw_series(LineSeries::new(
            vec![(x_min, fit.at(x_min)), (x_max, fit.at(x_max))],
            RED.mix(0.8).stroke_width(2),
        ))?;
    }

    Ok(())
}

fn draw_text(area: &Area<'_>, lines: &[String]) -> Result<(), RenderError> {
    let (width, height) = area.dim_in_pixel();
    let (width, height) = (width as i32, height as i32);
    area.draw(&Rectangle::new(
        [(width / 10, height / 10), (width * 9 / 10, height * 9 / 10)],
        SUMMARY_BOX.filled(),
    ))?;

    let style = TextStyle::from((TEXT_PANEL_FONT, 20).into_font()).color(&BLACK);
    let line_height = 28;
    for (i, line) in lines.iter().enumerate() {
        area.draw_text(
            line,
            &style,
            (width / 10 + 20, height / 10 + 20 + line_height * i as i32),
        )?;
    }

    Ok(())
}
