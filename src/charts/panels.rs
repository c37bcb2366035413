use plotters::prelude::*;

use super::error::ChartRenderError;
use super::render::{encode_png, AxisBounds, ChartStyle, CHART_HEIGHT_PX, CHART_WIDTH_PX};
use super::scatter::CountryScatter;

const PANEL_ROWS: usize = 4;
const PANEL_COLS: usize = 3;

pub(crate) struct MonthPanel {
    pub(crate) month: u32,
    pub(crate) countries: Vec<CountryScatter>,
}

/// One scatter cell per month of a year, 4 rows by 3 columns.
pub(crate) fn render_monthly_panels_png(
    year: i32,
    panels: &[MonthPanel],
    bounds: AxisBounds,
) -> Result<Vec<u8>, ChartRenderError> {
    let total_points: usize = panels
        .iter()
        .flat_map(|panel| panel.countries.iter())
        .map(|country| country.points.len())
        .sum();
    if total_points == 0 {
        return Err(ChartRenderError::NotEnoughPoints);
    }

    let width = CHART_WIDTH_PX;
    let height = CHART_HEIGHT_PX;
    let mut rgb_buffer = vec![255u8; width as usize * height as usize * 3];

    {
        let drawing_area =
            BitMapBackend::with_buffer(&mut rgb_buffer, (width, height)).into_drawing_area();
        drawing_area
            .fill(&ChartStyle::BACKGROUND)
            .map_err(|error| ChartRenderError::Backend(format!("background fill: {:?}", error)))?;

        let titled_area = drawing_area
            .titled(
                &year.to_string(),
                (
                    ChartStyle::CAPTION_FONT_FAMILY,
                    ChartStyle::CAPTION_FONT_SIZE,
                ),
            )
            .map_err(|error| ChartRenderError::Backend(format!("title: {:?}", error)))?;

        let cells = titled_area.split_evenly((PANEL_ROWS, PANEL_COLS));

        for panel in panels {
            if panel.month < 1 || panel.month > (PANEL_ROWS * PANEL_COLS) as u32 {
                continue;
            }
            let cell = &cells[(panel.month - 1) as usize];

            let mut chart = ChartBuilder::on(cell)
                .margin(6)
                .caption(
                    format!("{:02}", panel.month),
                    (ChartStyle::CAPTION_FONT_FAMILY, 12),
                )
                .x_label_area_size(16)
                .y_label_area_size(28)
                .build_cartesian_2d(
                    0.0..bounds.production_max_mwh,
                    0.0..bounds.intensity_max_g_per_kwh,
                )
                .map_err(|error| ChartRenderError::Backend(format!("cell build: {:?}", error)))?;

            chart
                .configure_mesh()
                .x_labels(2)
                .y_labels(3)
                .label_style((ChartStyle::CAPTION_FONT_FAMILY, 9))
                .draw()
                .map_err(|error| ChartRenderError::Backend(format!("cell mesh: {:?}", error)))?;

            let cloud_alpha = (1.0 / panel.countries.len().max(1) as f64).max(0.05);
            for country in &panel.countries {
                let color = country.color;
                chart
                    .draw_series(country.points.iter().map(|point| {
                        Circle::new(
                            (point.production_mwh, point.intensity_g_per_kwh),
                            1,
                            color.mix(cloud_alpha).filled(),
                        )
                    }))
                    .map_err(|error| {
                        ChartRenderError::Backend(format!("cell series: {:?}", error))
                    })?;
            }
        }

        drawing_area
            .present()
            .map_err(|error| ChartRenderError::Backend(format!("present: {:?}", error)))?;
    }

    encode_png(width, height, rgb_buffer)
}
