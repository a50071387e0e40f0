//! Six-panel chart dashboard rendered with `plotters`.

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::info;

use crate::{model::WeatherTable, pipeline::require_non_empty};

pub mod palette;
pub mod panels;

pub const WIDTH: u32 = 1600;
pub const HEIGHT: u32 = 1200;

const TITLE: &str = "Weather Data Visualization Dashboard";
const SUBTITLE: &str = "(Real-time data from Open-Meteo API)";
const TITLE_HEIGHT: u32 = 90;

/// Panel titles in grid order, left to right then top to bottom.
pub const PANEL_TITLES: [&str; 6] = [
    "Temperature bar chart",
    "Temperature vs Humidity scatter plot",
    "Humidity levels horizontal bar chart",
    "Wind speed line chart",
    "Weather conditions pie chart",
    "Actual vs Feels Like temperature comparison",
];

type Panel<DB> = fn(&DrawingArea<DB, Shift>, &WeatherTable) -> Result<()>;

/// Render the dashboard for `table` to a PNG at `path`.
pub fn render(table: &WeatherTable, path: &Path) -> Result<()> {
    require_non_empty(table)?;

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    draw(&root, table)?;
    root.present()
        .with_context(|| format!("Failed to write dashboard image: {}", path.display()))?;

    info!(path = %path.display(), records = table.len(), "dashboard written");
    Ok(())
}

/// Draw the title and the 2×3 panel grid onto any backend.
pub fn draw<DB>(root: &DrawingArea<DB, Shift>, table: &WeatherTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (header, body) = root.split_vertically(TITLE_HEIGHT);
    let (w, _) = header.dim_in_pixel();
    let center_x = w as i32 / 2;
    let title_style = TextStyle::from(("sans-serif", 32.0).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Top));
    let subtitle_style =
        TextStyle::from(("sans-serif", 20.0).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    header.draw_text(TITLE, &title_style, (center_x, 12))?;
    header.draw_text(SUBTITLE, &subtitle_style, (center_x, 54))?;

    let panels: [Panel<DB>; 6] = [
        panels::temperature_bars,
        panels::temperature_humidity_scatter,
        panels::humidity_bars,
        panels::wind_line,
        panels::condition_pie,
        panels::feels_like_bars,
    ];

    let cells = body.margin(0, 10, 10, 10).split_evenly((2, 3));
    for ((cell, panel), title) in cells.iter().zip(panels).zip(PANEL_TITLES) {
        panel(cell, table).with_context(|| format!("Failed to draw panel: {title}"))?;
    }

    Ok(())
}
