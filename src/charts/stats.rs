use crate::series::SeriesTable;

#[derive(Debug, Clone, Copy)]
pub(crate) struct IntensityPoint {
    pub(crate) production_mwh: f64,
    pub(crate) intensity_g_per_kwh: f64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CountrySummary {
    pub(crate) mean_production_mwh: f64,
    pub(crate) average_intensity_g_per_kwh: f64,
}

/// One point per timestamp: total production energy against emission
/// intensity. Rows without any defined production are skipped, they have no
/// meaningful intensity.
pub(crate) fn intensity_points(
    production: &SeriesTable,
    emission: &SeriesTable,
    time_step_hours: f64,
) -> Vec<IntensityPoint> {
    let rows = production.len().min(emission.len());
    let mut points = Vec::with_capacity(rows);

    for row in 0..rows {
        let production_mwh = production.row_sum_defined(row) * time_step_hours;
        let emission_tonnes = emission.row_sum_defined(row);
        if production_mwh <= 0.0 || !production_mwh.is_finite() {
            continue;
        }

        let intensity = emission_tonnes / production_mwh * 1000.0;
        if !intensity.is_finite() {
            continue;
        }

        points.push(IntensityPoint {
            production_mwh,
            intensity_g_per_kwh: intensity,
        });
    }

    points
}

/// Window-level aggregate: mean production per timestamp and the
/// energy-weighted average intensity.
pub(crate) fn country_summary(
    production: &SeriesTable,
    emission: &SeriesTable,
    time_step_hours: f64,
) -> Option<CountrySummary> {
    let rows = production.len().min(emission.len());
    let mut total_production_mwh = 0.0;
    let mut total_emission_tonnes = 0.0;
    let mut counted_rows = 0usize;

    for row in 0..rows {
        let production_mwh = production.row_sum_defined(row) * time_step_hours;
        if production_mwh <= 0.0 || !production_mwh.is_finite() {
            continue;
        }

        total_production_mwh += production_mwh;
        total_emission_tonnes += emission.row_sum_defined(row);
        counted_rows += 1;
    }

    if counted_rows == 0 || total_production_mwh <= 0.0 {
        return None;
    }

    Some(CountrySummary {
        mean_production_mwh: total_production_mwh / counted_rows as f64,
        average_intensity_g_per_kwh: total_emission_tonnes / total_production_mwh * 1000.0,
    })
}
