use plotters::prelude::*;

use super::error::ChartRenderError;
use super::render::{encode_png, AxisBounds, ChartStyle, CHART_HEIGHT_PX, CHART_WIDTH_PX};
use super::stats::{CountrySummary, IntensityPoint};

pub(crate) struct CountryScatter {
    pub(crate) code: String,
    pub(crate) color: RGBColor,
    pub(crate) points: Vec<IntensityPoint>,
    pub(crate) summary: Option<CountrySummary>,
}

/// Cloud of per-timestamp intensity points per country plus one emphasized
/// mean point per country.
pub(crate) fn render_scatter_png(
    title: &str,
    countries: &[CountryScatter],
    bounds: AxisBounds,
) -> Result<Vec<u8>, ChartRenderError> {
    let total_points: usize = countries.iter().map(|country| country.points.len()).sum();
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

        let mut chart = ChartBuilder::on(&drawing_area)
            .margin(ChartStyle::MARGIN)
            .caption(
                title,
                (
                    ChartStyle::CAPTION_FONT_FAMILY,
                    ChartStyle::CAPTION_FONT_SIZE,
                ),
            )
            .x_label_area_size(ChartStyle::X_LABEL_AREA_SIZE)
            .y_label_area_size(ChartStyle::Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(
                0.0..bounds.production_max_mwh,
                0.0..bounds.intensity_max_g_per_kwh,
            )
            .map_err(|error| ChartRenderError::Backend(format!("chart build: {:?}", error)))?;

        chart
            .configure_mesh()
            .x_labels(ChartStyle::X_LABEL_COUNT)
            .y_labels(ChartStyle::Y_LABEL_COUNT)
            .x_desc(ChartStyle::PRODUCTION_AXIS_DESC)
            .y_desc(ChartStyle::INTENSITY_AXIS_DESC)
            .draw()
            .map_err(|error| ChartRenderError::Backend(format!("mesh draw: {:?}", error)))?;

        let cloud_alpha = (1.0 / countries.len().max(1) as f64).max(0.05);
        for country in countries {
            let color = country.color;
            chart
                .draw_series(country.points.iter().map(|point| {
                    Circle::new(
                        (point.production_mwh, point.intensity_g_per_kwh),
                        2,
                        color.mix(cloud_alpha).filled(),
                    )
                }))
                .map_err(|error| ChartRenderError::Backend(format!("series draw: {:?}", error)))?
                .label(country.code.clone())
                .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));

            if let Some(summary) = &country.summary {
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (
                            summary.mean_production_mwh,
                            summary.average_intensity_g_per_kwh,
                        ),
                        6,
                        color.filled(),
                    )))
                    .map_err(|error| {
                        ChartRenderError::Backend(format!("mean point draw: {:?}", error))
                    })?;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(ChartStyle::BACKGROUND.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|error| ChartRenderError::Backend(format!("legend draw: {:?}", error)))?;

        drawing_area
            .present()
            .map_err(|error| ChartRenderError::Backend(format!("present: {:?}", error)))?;
    }

    encode_png(width, height, rgb_buffer)
}
