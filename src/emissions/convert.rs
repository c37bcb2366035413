use crate::series::SeriesTable;

use super::factors::EmissionFactors;

/// Scales per-step MW into tCO2eq per step: hours per sample step for the
/// MW→MWh part, divided by 1000 for kg→tonne.
pub fn unit_conversion(steps_per_hour: u32) -> f64 {
    1.0 / (steps_per_hour as f64 * 1000.0)
}

/// Pure conversion of a generation table into an emission table with the same
/// timestamp index and column set. Sources without a defined factor keep
/// their column but every cell becomes `None`.
pub fn emissions_from_generation(
    generation: &SeriesTable,
    factors: &EmissionFactors,
    unit_conversion: f64,
) -> SeriesTable {
    let column_factors: Vec<Option<f64>> = generation
        .columns()
        .iter()
        .map(|source| factors.intensity(source))
        .collect();

    let rows = generation
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(&column_factors)
                .map(|(cell, factor)| match factor {
                    Some(factor) => cell.map(|megawatts| megawatts * factor * unit_conversion),
                    None => None,
                })
                .collect()
        })
        .collect();

    let result = SeriesTable::from_parts(
        generation.timestamps().to_vec(),
        generation.columns().to_vec(),
        rows,
    );

    // shape and order are inherited from the input table
    match result {
        Ok(table) => table,
        Err(_) => unreachable!("emission table mirrors a validated generation table"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Duration, TimeZone, Utc};

    use super::{emissions_from_generation, unit_conversion};
    use crate::emissions::factors::EmissionFactors;
    use crate::series::SeriesTable;

    fn generation_fixture() -> SeriesTable {
        let start = Utc.with_ymd_and_hms(2018, 3, 1, 0, 0, 0).unwrap();
        SeriesTable::from_parts(
            vec![start, start + Duration::hours(1)],
            vec![
                "Nuclear".to_string(),
                "Wind Onshore".to_string(),
                "Other renewable".to_string(),
            ],
            vec![
                vec![Some(100.0), Some(50.0), Some(7.0)],
                vec![Some(200.0), None, Some(9.0)],
            ],
        )
        .expect("valid fixture")
    }

    #[test]
    fn hourly_nuclear_example() {
        let generation = generation_fixture();
        let factors = EmissionFactors::builtin();
        let emission = emissions_from_generation(&generation, &factors, unit_conversion(1));

        // 100 MW for one hour at 12 kgCO2eq/MWh = 1.2 t
        let cell = emission.rows()[0][0].expect("nuclear cell defined");
        assert!((cell - 1.2).abs() < 1e-12);
    }

    #[test]
    fn index_and_columns_match_the_input() {
        let generation = generation_fixture();
        let factors = EmissionFactors::builtin();
        let emission = emissions_from_generation(&generation, &factors, unit_conversion(4));

        assert_eq!(emission.timestamps(), generation.timestamps());
        assert_eq!(emission.columns(), generation.columns());
        assert_eq!(emission.len(), generation.len());
    }

    #[test]
    fn undefined_factor_blanks_the_whole_column() {
        let generation = generation_fixture();
        let factors = EmissionFactors::builtin();
        let emission = emissions_from_generation(&generation, &factors, unit_conversion(1));

        for row in emission.rows() {
            assert_eq!(row[2], None);
        }
    }

    #[test]
    fn missing_input_cells_stay_missing() {
        let generation = generation_fixture();
        let factors = EmissionFactors::builtin();
        let emission = emissions_from_generation(&generation, &factors, unit_conversion(1));

        assert_eq!(emission.rows()[1][1], None);
    }

    #[test]
    fn dividing_by_factor_and_constant_recovers_the_input() {
        let generation = generation_fixture();
        let factors = EmissionFactors::builtin();
        let constant = unit_conversion(4);
        let emission = emissions_from_generation(&generation, &factors, constant);

        for (column_index, source) in generation.columns().iter().enumerate() {
            let Some(factor) = factors.intensity(source) else {
                continue;
            };
            for (row_index, row) in generation.rows().iter().enumerate() {
                let Some(original) = row[column_index] else {
                    continue;
                };
                let converted = emission.rows()[row_index][column_index]
                    .expect("defined factor keeps the cell defined");
                let recovered = converted / (factor * constant);
                assert!((recovered - original).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn config_override_defines_the_undefined_source() {
        let generation = generation_fixture();
        let mut overrides = HashMap::new();
        overrides.insert("Other renewable".to_string(), 20.0);
        let factors = EmissionFactors::with_overrides(&overrides);
        let emission = emissions_from_generation(&generation, &factors, unit_conversion(1));

        let cell = emission.rows()[0][2].expect("overridden factor defines the cell");
        assert!((cell - 7.0 * 20.0 / 1000.0).abs() < 1e-12);
    }
}
