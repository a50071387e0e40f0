//! The six dashboard panels. Each draws one chart from the table into its own area.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

use super::palette;
use crate::model::{WeatherRecord, WeatherTable};

const FONT: &str = "sans-serif";
const CAPTION_SIZE: f64 = 20.0;
const LABEL_SIZE: f64 = 12.0;
const AXIS_DESC_SIZE: f64 = 14.0;
const BAR_HALF_WIDTH: f64 = 0.4;
const GROUP_BAR_WIDTH: f64 = 0.35;
const COLORBAR_WIDTH: u32 = 90;
const COLORBAR_STEPS: usize = 32;

/// Position of each value within the observed min–max range, in [0, 1].
///
/// A degenerate range maps every value to the middle.
pub fn range_positions(values: &[f64]) -> Vec<f64> {
    let (min, max) = bounds(values);
    let span = max - min;
    values
        .iter()
        .map(|v| if span > 0.0 { (v - min) / span } else { 0.5 })
        .collect()
}

/// Records sorted ascending by humidity; equal values keep table order.
pub fn by_humidity(table: &WeatherTable) -> Vec<&WeatherRecord> {
    let mut rows: Vec<_> = table.iter().collect();
    rows.sort_by(|a, b| a.humidity.total_cmp(&b.humidity));
    rows
}

/// Number of cities per condition label, most frequent first.
/// Equal counts keep the order in which the label first appears.
pub fn condition_counts(table: &WeatherTable) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for r in table {
        match counts.iter_mut().find(|(label, _)| *label == r.condition_label) {
            Some((_, n)) => *n += 1,
            None => counts.push((r.condition_label.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Left and right bar spans for the actual/feels-like pair at category `index`.
pub fn grouped_bar_spans(index: usize) -> (Range<f64>, Range<f64>) {
    let center = index as f64;
    (center - GROUP_BAR_WIDTH..center, center..center + GROUP_BAR_WIDTH)
}

/// Axis range covering `values`, padded by 10% of the span (or 1.0 when flat).
pub fn padded_range(values: &[f64], include_zero: bool) -> Range<f64> {
    let (mut min, mut max) = bounds(values);
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    let pad = if max - min > 1e-9 { (max - min) * 0.1 } else { 1.0 };
    min - pad..max + pad
}

/// Vertical bands of a colour bar over the observed range, bottom first,
/// each with the ramp position of its midpoint.
///
/// A flat range yields one band of width 2 around the value, at 0.5.
pub fn colorbar_bands(values: &[f64], steps: usize) -> Vec<(Range<f64>, f64)> {
    let (min, max) = bounds(values);
    let span = max - min;
    if span <= 0.0 || steps == 0 {
        return vec![(min - 1.0..max + 1.0, 0.5)];
    }
    let step = span / steps as f64;
    (0..steps)
        .map(|i| {
            let lo = min + step * i as f64;
            let hi = if i + 1 == steps { max } else { lo + step };
            (lo..hi, (i as f64 + 0.5) / steps as f64)
        })
        .collect()
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
}

fn category_range(n: usize) -> Range<f64> {
    -0.5..n as f64 - 0.5
}

fn category_ticks(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

fn category_label(names: &[&str], v: f64) -> String {
    let i = v.round();
    if (v - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    names.get(i as usize).map(|s| s.to_string()).unwrap_or_default()
}

fn caption_font() -> FontDesc<'static> {
    (FONT, CAPTION_SIZE).into_font().style(FontStyle::Bold)
}

fn label_style(h: HPos, v: VPos) -> TextStyle<'static> {
    TextStyle::from((FONT, LABEL_SIZE).into_font()).pos(Pos::new(h, v))
}

fn rotated_tick_font() -> FontDesc<'static> {
    (FONT, LABEL_SIZE).into_font().transform(FontTransform::Rotate90)
}

/// 1. Temperature per city, coloured by position in the observed range.
pub fn temperature_bars<DB>(area: &DrawingArea<DB, Shift>, table: &WeatherTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let names = table.cities();
    let temps: Vec<f64> = table.iter().map(|r| r.temperature).collect();
    let shades = range_positions(&temps);

    let mut chart = ChartBuilder::on(area)
        .caption("Temperature by City", caption_font())
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(50)
        .build_cartesian_2d(
            category_range(names.len()).with_key_points(category_ticks(names.len())),
            padded_range(&temps, true),
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("City")
        .y_desc("Temperature (°C)")
        .axis_desc_style((FONT, AXIS_DESC_SIZE).into_font().style(FontStyle::Bold))
        .x_label_style(rotated_tick_font())
        .x_label_formatter(&|v| category_label(&names, *v))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(temps.iter().zip(&shades).enumerate().map(|(i, (t, shade))| {
        let x = i as f64;
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, *t)],
            palette::diverging(*shade).filled(),
        )
    }))?;
    chart.draw_series(temps.iter().enumerate().map(|(i, t)| {
        let x = i as f64;
        Rectangle::new([(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, *t)], BLACK.stroke_width(1))
    }))?;

    let value_style = label_style(HPos::Center, VPos::Bottom);
    chart.draw_series(temps.iter().enumerate().map(|(i, t)| {
        Text::new(format!("{t:.1}°C"), (i as f64, *t), value_style.clone())
    }))?;

    Ok(())
}

/// 2. Temperature against humidity, one labelled point per city, with a
/// temperature colour bar on the right.
pub fn temperature_humidity_scatter<DB>(area: &DrawingArea<DB, Shift>, table: &WeatherTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let temps: Vec<f64> = table.iter().map(|r| r.temperature).collect();
    let humidity: Vec<f64> = table.iter().map(|r| r.humidity).collect();
    let shades = range_positions(&temps);

    let (w, _) = area.dim_in_pixel();
    let (plot_area, bar_area) = area.split_horizontally(w.saturating_sub(COLORBAR_WIDTH));
    temperature_colorbar(&bar_area, &temps)?;

    let mut chart = ChartBuilder::on(&plot_area)
        .caption("Temperature vs Humidity", caption_font())
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(padded_range(&temps, false), padded_range(&humidity, false))?;

    chart
        .configure_mesh()
        .x_desc("Temperature (°C)")
        .y_desc("Humidity (%)")
        .axis_desc_style((FONT, AXIS_DESC_SIZE).into_font().style(FontStyle::Bold))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let name_style = label_style(HPos::Right, VPos::Center);
    chart.draw_series(table.iter().zip(&shades).map(|(r, shade)| {
        EmptyElement::at((r.temperature, r.humidity))
            + Circle::new((0, 0), 9, palette::cool_warm(*shade).mix(0.7).filled())
            + Circle::new((0, 0), 9, BLACK.stroke_width(1))
            + Text::new(r.city.clone(), (-12, 0), name_style.clone())
    }))?;

    Ok(())
}

fn temperature_colorbar<DB>(area: &DrawingArea<DB, Shift>, temps: &[f64]) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let bands = colorbar_bands(temps, COLORBAR_STEPS);
    let low = bands.first().map_or(0.0, |(r, _)| r.start);
    let high = bands.last().map_or(1.0, |(r, _)| r.end);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_top(40)
        .margin_right(0)
        .x_label_area_size(50)
        .right_y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, low..high)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("Temperature (°C)")
        .y_labels(6)
        .axis_desc_style((FONT, LABEL_SIZE).into_font())
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    chart.draw_series(bands.iter().map(|(band, shade)| {
        Rectangle::new([(0.0, band.start), (1.0, band.end)], palette::cool_warm(*shade).filled())
    }))?;
    chart.draw_series(std::iter::once(Rectangle::new([(0.0, low), (1.0, high)], BLACK.stroke_width(1))))?;

    Ok(())
}

/// 3. Humidity per city as horizontal bars, lowest first.
pub fn humidity_bars<DB>(area: &DrawingArea<DB, Shift>, table: &WeatherTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let rows = by_humidity(table);
    let names: Vec<&str> = rows.iter().map(|r| r.city.as_str()).collect();
    let max_humidity = rows.iter().map(|r| r.humidity).fold(100.0, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption("Humidity Levels by City", caption_font())
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(
            0.0..max_humidity * 1.15,
            category_range(names.len()).with_key_points(category_ticks(names.len())),
        )?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Humidity (%)")
        .y_desc("City")
        .axis_desc_style((FONT, AXIS_DESC_SIZE).into_font().style(FontStyle::Bold))
        .y_label_formatter(&|v| category_label(&names, *v))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(rows.iter().enumerate().map(|(i, r)| {
        let y = i as f64;
        Rectangle::new(
            [(0.0, y - BAR_HALF_WIDTH), (r.humidity, y + BAR_HALF_WIDTH)],
            palette::blues(r.humidity / 100.0).filled(),
        )
    }))?;
    chart.draw_series(rows.iter().enumerate().map(|(i, r)| {
        let y = i as f64;
        Rectangle::new([(0.0, y - BAR_HALF_WIDTH), (r.humidity, y + BAR_HALF_WIDTH)], BLACK.stroke_width(1))
    }))?;

    let value_style = label_style(HPos::Left, VPos::Center);
    chart.draw_series(rows.iter().enumerate().map(|(i, r)| {
        Text::new(format!(" {:.0}%", r.humidity), (r.humidity, i as f64), value_style.clone())
    }))?;

    Ok(())
}

/// 4. Wind speed per city in registry order, area beneath shaded.
pub fn wind_line<DB>(area: &DrawingArea<DB, Shift>, table: &WeatherTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let names = table.cities();
    let points: Vec<(f64, f64)> =
        table.iter().enumerate().map(|(i, r)| (i as f64, r.wind_speed)).collect();
    let winds: Vec<f64> = points.iter().map(|p| p.1).collect();

    let mut chart = ChartBuilder::on(area)
        .caption("Wind Speed Comparison", caption_font())
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(50)
        .build_cartesian_2d(
            category_range(names.len()).with_key_points(category_ticks(names.len())),
            padded_range(&winds, true),
        )?;

    chart
        .configure_mesh()
        .x_desc("City")
        .y_desc("Wind Speed (m/s)")
        .axis_desc_style((FONT, AXIS_DESC_SIZE).into_font().style(FontStyle::Bold))
        .x_label_style(rotated_tick_font())
        .x_label_formatter(&|v| category_label(&names, *v))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(AreaSeries::new(points.clone(), 0.0, palette::LIGHT_GREEN.mix(0.3)))?;
    chart.draw_series(LineSeries::new(points.clone(), palette::DARK_GREEN.stroke_width(2)))?;
    chart.draw_series(points.iter().map(|p| Circle::new(*p, 6, palette::LIGHT_GREEN.filled())))?;
    chart.draw_series(points.iter().map(|p| Circle::new(*p, 6, BLACK.stroke_width(1))))?;

    Ok(())
}

/// 5. Share of cities per weather condition.
pub fn condition_pie<DB>(area: &DrawingArea<DB, Shift>, table: &WeatherTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let counts = condition_counts(table);
    let labels: Vec<String> = counts.iter().map(|(label, _)| label.clone()).collect();
    let sizes: Vec<f64> = counts.iter().map(|(_, n)| *n as f64).collect();
    let colors: Vec<RGBColor> = (0..counts.len()).map(palette::qualitative).collect();

    let inner = area.titled("Weather Conditions Distribution", caption_font())?;
    let (w, h) = inner.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.32;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style((FONT, LABEL_SIZE + 1.0).into_font().color(&BLACK));
    pie.percentages((FONT, LABEL_SIZE).into_font().style(FontStyle::Bold).color(&BLACK));
    inner.draw(&pie)?;

    Ok(())
}

/// 6. Actual against feels-like temperature, one pair of bars per city.
pub fn feels_like_bars<DB>(area: &DrawingArea<DB, Shift>, table: &WeatherTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let names = table.cities();
    let values: Vec<f64> = table.iter().flat_map(|r| [r.temperature, r.feels_like]).collect();

    let mut chart = ChartBuilder::on(area)
        .caption("Actual Temperature vs Feels Like", caption_font())
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(50)
        .build_cartesian_2d(
            category_range(names.len()).with_key_points(category_ticks(names.len())),
            padded_range(&values, true),
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("City")
        .y_desc("Temperature (°C)")
        .axis_desc_style((FONT, AXIS_DESC_SIZE).into_font().style(FontStyle::Bold))
        .x_label_style(rotated_tick_font())
        .x_label_formatter(&|v| category_label(&names, *v))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart
        .draw_series(table.iter().enumerate().map(|(i, r)| {
            let (left, _) = grouped_bar_spans(i);
            Rectangle::new([(left.start, 0.0), (left.end, r.temperature)], palette::CORAL.filled())
        }))?
        .label("Actual Temp")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], palette::CORAL.filled()));

    chart
        .draw_series(table.iter().enumerate().map(|(i, r)| {
            let (_, right) = grouped_bar_spans(i);
            Rectangle::new([(right.start, 0.0), (right.end, r.feels_like)], palette::SKY_BLUE.filled())
        }))?
        .label("Feels Like")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], palette::SKY_BLUE.filled()));

    chart.draw_series(table.iter().enumerate().flat_map(|(i, r)| {
        let (left, right) = grouped_bar_spans(i);
        [
            Rectangle::new([(left.start, 0.0), (left.end, r.temperature)], BLACK.stroke_width(1)),
            Rectangle::new([(right.start, 0.0), (right.end, r.feels_like)], BLACK.stroke_width(1)),
        ]
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, LABEL_SIZE))
        .draw()?;

    Ok(())
}
