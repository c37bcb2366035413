use plotters::prelude::*;

use super::error::ChartRenderError;
use super::render::{encode_png, ChartStyle, CHART_HEIGHT_PX, CHART_WIDTH_PX};

#[derive(Clone)]
pub(crate) struct CountryTrend {
    pub(crate) code: String,
    pub(crate) color: RGBColor,
    /// Average intensity per year, `None` where the year had no data.
    pub(crate) averages: Vec<(i32, Option<f64>)>,
}

/// Average intensity per country over the run's years.
pub(crate) fn render_average_png(trends: &[CountryTrend]) -> Result<Vec<u8>, ChartRenderError> {
    let lines = defined_lines(trends);
    render_trend_lines(
        "Average gCO2/kWh per year",
        ChartStyle::INTENSITY_AXIS_DESC,
        &lines,
    )
}

/// Same series indexed so each country's first defined year reads 100.
pub(crate) fn render_evolution_png(trends: &[CountryTrend]) -> Result<Vec<u8>, ChartRenderError> {
    let lines: Vec<TrendLine> = defined_lines(trends)
        .into_iter()
        .filter_map(|line| {
            let baseline = line.points.first().map(|(_, value)| *value)?;
            if baseline <= 0.0 {
                return None;
            }
            Some(TrendLine {
                code: line.code,
                color: line.color,
                points: line
                    .points
                    .into_iter()
                    .map(|(year, value)| (year, value / baseline * 100.0))
                    .collect(),
            })
        })
        .collect();

    render_trend_lines("Evolution of gCO2/kWh, first year = 100", "Ratio", &lines)
}

struct TrendLine {
    code: String,
    color: RGBColor,
    points: Vec<(i32, f64)>,
}

fn defined_lines(trends: &[CountryTrend]) -> Vec<TrendLine> {
    trends
        .iter()
        .map(|trend| TrendLine {
            code: trend.code.clone(),
            color: trend.color,
            points: trend
                .averages
                .iter()
                .filter_map(|(year, average)| {
                    average
                        .filter(|value| value.is_finite())
                        .map(|value| (*year, value))
                })
                .collect(),
        })
        .filter(|line| !line.points.is_empty())
        .collect()
}

fn render_trend_lines(
    title: &str,
    y_desc: &str,
    lines: &[TrendLine],
) -> Result<Vec<u8>, ChartRenderError> {
    if lines.is_empty() {
        return Err(ChartRenderError::NotEnoughPoints);
    }

    let year_min = lines
        .iter()
        .flat_map(|line| line.points.iter().map(|(year, _)| *year))
        .min()
        .unwrap_or(0);
    let year_max = lines
        .iter()
        .flat_map(|line| line.points.iter().map(|(year, _)| *year))
        .max()
        .unwrap_or(year_min);
    // single-year runs still need a non-empty axis
    let (year_min, year_max) = if year_min == year_max {
        (year_min - 1, year_max + 1)
    } else {
        (year_min, year_max)
    };

    let value_max = lines
        .iter()
        .flat_map(|line| line.points.iter().map(|(_, value)| *value))
        .fold(0.0f64, f64::max);
    let y_max = if value_max > 0.0 { value_max * 1.15 } else { 100.0 };

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
            .build_cartesian_2d(year_min..year_max, 0.0..y_max)
            .map_err(|error| ChartRenderError::Backend(format!("chart build: {:?}", error)))?;

        chart
            .configure_mesh()
            .x_labels(ChartStyle::X_LABEL_COUNT)
            .y_labels(ChartStyle::Y_LABEL_COUNT)
            .x_desc("Year")
            .y_desc(y_desc)
            .draw()
            .map_err(|error| ChartRenderError::Backend(format!("mesh draw: {:?}", error)))?;

        for line in lines {
            let color = line.color;
            chart
                .draw_series(LineSeries::new(line.points.iter().copied(), &color))
                .map_err(|error| ChartRenderError::Backend(format!("line draw: {:?}", error)))?
                .label(line.code.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color)
                });

            // markers keep single-year series visible
            chart
                .draw_series(
                    line.points
                        .iter()
                        .map(|point| Circle::new(*point, 3, color.filled())),
                )
                .map_err(|error| ChartRenderError::Backend(format!("marker draw: {:?}", error)))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::MiddleRight)
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
