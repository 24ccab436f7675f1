// src/plot_framework.rs

use plotters::backend::{BitMapBackend, DrawingBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, ErrorBar, PathElement, Text};
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use log::info;

use crate::constants::{
    COLOR_GRIDLINE, DASH_GAP_PX, DASH_SEGMENT_PX, ERROR_BAR_CAP_WIDTH, FONT_SIZE_MESSAGE,
    LINE_WIDTH_LEGEND, LINE_WIDTH_PLOT,
};
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MAIN_TITLE,
    FONT_TUPLE_MESSAGE,
};
use crate::types::ChartPlotData;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Tick label text: "k"/"M" suffixes for large magnitudes, one decimal for
/// small fractional values, integers otherwise. Thousands that are not whole
/// keep one decimal so neighbouring ticks stay distinct (1.2k, 1.4k).
pub fn format_axis_label(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1000.0 {
        if value % 1000.0 == 0.0 {
            format!("{:.0}k", value / 1000.0)
        } else {
            format!("{:.1}k", value / 1000.0)
        }
    } else if value.abs() < 10.0 && value.fract() != 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.0}", value)
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    panel_name: &str,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    // Constants for text rendering
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4; // Additional spacing between lines

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{panel_name} {plot_type} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;
    let estimated_text_height = lines.len().saturating_mul(estimated_line_height as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - estimated_text_height / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

/// How a series is rendered.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesStyle {
    Line,
    DashedLine,
    /// Unconnected markers of the given radius.
    Points { size: u32 },
    /// Solid line with a marker and a symmetric vertical error bar per point.
    /// `errors[i]` is the half-height of the bar at `data[i]`.
    ErrorBars { errors: Vec<f64>, marker_size: u32 },
}

#[derive(Clone, Debug)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub style: SeriesStyle,
}

impl PlotSeries {
    pub fn line(data: Vec<(f64, f64)>, label: &str, color: RGBColor, stroke_width: u32) -> Self {
        Self {
            data,
            label: label.to_string(),
            color,
            stroke_width,
            style: SeriesStyle::Line,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    /// Y values of light horizontal reference lines drawn beneath the series.
    pub reference_lines: Vec<f64>,
    pub x_labels: usize,
}

impl PlotConfig {
    pub fn from_chart_data(data: ChartPlotData) -> Self {
        let (title, x_range, y_range, series, x_label, y_label) = data;
        Self {
            title,
            x_range,
            y_range,
            series,
            x_label,
            y_label,
            reference_lines: Vec::new(),
            x_labels: 10,
        }
    }

    fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.data.is_empty())
    }

    fn valid_ranges(&self) -> bool {
        self.x_range.end > self.x_range.start && self.y_range.end > self.y_range.start
    }
}

/// Draws a single chart from a PlotConfig.
fn draw_single_chart_with_config(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(plot_config.x_labels)
        .y_labels(10)
        .x_label_formatter(&|x| format_axis_label(*x))
        .y_label_formatter(&|y| format_axis_label(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    // Reference lines go first so data is drawn on top
    for &level in &plot_config.reference_lines {
        if level < plot_config.y_range.start || level > plot_config.y_range.end {
            continue;
        }
        chart.draw_series(LineSeries::new(
            vec![
                (plot_config.x_range.start, level),
                (plot_config.x_range.end, level),
            ],
            COLOR_GRIDLINE.stroke_width(LINE_WIDTH_PLOT),
        ))?;
    }

    let mut legend_series_count = 0;

    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let color = s.color;
        let stroke_width = s.stroke_width;

        match &s.style {
            SeriesStyle::Line => {
                let series = chart.draw_series(LineSeries::new(
                    s.data.iter().cloned(),
                    color.stroke_width(stroke_width),
                ))?;
                if !s.label.is_empty() {
                    series.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                    legend_series_count += 1;
                }
            }
            SeriesStyle::DashedLine => {
                let series = chart.draw_series(DashedLineSeries::new(
                    s.data.iter().cloned(),
                    DASH_SEGMENT_PX,
                    DASH_GAP_PX,
                    color.stroke_width(stroke_width),
                ))?;
                if !s.label.is_empty() {
                    series.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 8, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                    legend_series_count += 1;
                }
            }
            SeriesStyle::Points { size } => {
                let size = *size;
                let series = chart.draw_series(
                    s.data
                        .iter()
                        .map(|&point| Circle::new(point, size, color.filled())),
                )?;
                if !s.label.is_empty() {
                    series
                        .label(&s.label)
                        .legend(move |(x, y)| Circle::new((x + 10, y), size, color.filled()));
                    legend_series_count += 1;
                }
            }
            SeriesStyle::ErrorBars {
                errors,
                marker_size,
            } => {
                let marker_size = *marker_size;
                chart.draw_series(s.data.iter().zip(errors.iter()).map(|(&(x, y), &err)| {
                    ErrorBar::new_vertical(
                        x,
                        y - err,
                        y,
                        y + err,
                        color.stroke_width(stroke_width),
                        ERROR_BAR_CAP_WIDTH,
                    )
                }))?;
                chart.draw_series(
                    s.data
                        .iter()
                        .map(|&point| Circle::new(point, marker_size, color.filled())),
                )?;
                let series = chart.draw_series(LineSeries::new(
                    s.data.iter().cloned(),
                    color.stroke_width(stroke_width),
                ))?;
                if !s.label.is_empty() {
                    series.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                    legend_series_count += 1;
                }
            }
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    Ok(())
}

/// Draws the chart, or a placeholder message when it has nothing to show.
/// Returns whether a chart was drawn.
fn draw_chart_or_message(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    panel_name: &str,
    plot_type_name: &str,
    plot_config: Option<&PlotConfig>,
) -> Result<bool, Box<dyn Error>> {
    match plot_config {
        Some(config) if config.has_data() && config.valid_ranges() => {
            draw_single_chart_with_config(area, config)?;
            Ok(true)
        }
        Some(config) => {
            let reason = if !config.has_data() {
                "No data points"
            } else {
                "Invalid ranges"
            };
            draw_unavailable_message(area, panel_name, plot_type_name, reason)?;
            Ok(false)
        }
        None => {
            draw_unavailable_message(
                area,
                panel_name,
                plot_type_name,
                "Calculation/Data Extraction Failed",
            )?;
            Ok(false)
        }
    }
}

fn report_saved(output_path: &Path, any_plotted: bool) {
    if any_plotted {
        info!("Plot saved as '{}'.", output_path.display());
    } else {
        info!(
            "Saved '{}' with placeholder messages only: no panel had data to plot.",
            output_path.display()
        );
    }
}

/// Creates a plot image with one row of panels, one per entry in `panel_names`.
pub fn draw_side_by_side_plot<'a, F>(
    output_path: &'a Path,
    size: (u32, u32),
    root_name: &str,
    plot_type_name: &str,
    panel_names: &[&str],
    mut get_panel_plot_config: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(usize) -> Option<PlotConfig>,
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    let root_area = BitMapBackend::new(output_path, size).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        FONT_TUPLE_MAIN_TITLE.into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((1, panel_names.len().max(1)));
    let mut any_panel_plotted = false;

    for (panel_index, (area, panel_name)) in
        sub_plot_areas.iter().zip(panel_names.iter()).enumerate()
    {
        let plot_config = get_panel_plot_config(panel_index);
        any_panel_plotted |=
            draw_chart_or_message(area, panel_name, plot_type_name, plot_config.as_ref())?;
    }

    root_area.present()?;
    report_saved(output_path, any_panel_plotted);
    Ok(())
}

/// Creates a plot image holding a single chart.
pub fn draw_single_plot<'a>(
    output_path: &'a Path,
    size: (u32, u32),
    root_name: &str,
    plot_type_name: &str,
    plot_config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>>
where
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    let root_area = BitMapBackend::new(output_path, size).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        FONT_TUPLE_MAIN_TITLE.into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);

    let plotted =
        draw_chart_or_message(&margined_root_area, root_name, plot_type_name, plot_config)?;

    root_area.present()?;
    report_saved(output_path, plotted);
    Ok(())
}
