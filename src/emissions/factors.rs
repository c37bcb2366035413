use std::collections::HashMap;

// Life-cycle CO2 intensity per technology in kgCO2eq/MWh, median values from
// IPCC AR5 WG3 annex III table A.III.2 unless noted. Brown and hard coal share
// the generic coal number, all hydro variants share 24, coal-derived gas and
// peat have no published number and borrow fossil gas / coal respectively.
const BUILTIN_FACTORS: &[(&str, Option<f64>)] = &[
    ("Biomass", Some(230.0)),
    ("Fossil Brown coal/Lignite", Some(820.0)),
    ("Fossil Coal-derived gas", Some(490.0)),
    ("Fossil Gas", Some(490.0)),
    ("Fossil Hard coal", Some(820.0)),
    ("Fossil Oil", Some(733.0)),
    ("Fossil Oil shale", Some(733.0)),
    ("Fossil Peat", Some(820.0)),
    ("Geothermal", Some(38.0)),
    ("Hydro Pumped Storage", Some(24.0)),
    ("Hydro Run-of-river and poundage", Some(24.0)),
    ("Hydro Water Reservoir", Some(24.0)),
    ("Marine", Some(17.0)),
    ("Nuclear", Some(12.0)),
    // conservative: reuse the coal number for the unlabeled bucket
    ("Other", Some(820.0)),
    ("Other renewable", None),
    ("Solar", Some(41.0)),
    ("Waste", Some(922.22)),
    ("Wind Offshore", Some(12.0)),
    ("Wind Onshore", Some(11.0)),
];

#[derive(Debug, Clone)]
pub struct EmissionFactors {
    by_source: HashMap<String, Option<f64>>,
}

impl EmissionFactors {
    pub fn builtin() -> Self {
        let by_source = BUILTIN_FACTORS
            .iter()
            .map(|(source, factor)| (source.to_string(), *factor))
            .collect();
        Self { by_source }
    }

    pub fn with_overrides(overrides: &HashMap<String, f64>) -> Self {
        let mut factors = Self::builtin();
        for (source, factor) in overrides {
            factors.by_source.insert(source.clone(), Some(*factor));
        }
        factors
    }

    /// `None` both for sources without a defined factor and for unknown sources.
    pub fn intensity(&self, source: &str) -> Option<f64> {
        self.by_source.get(source).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::EmissionFactors;

    #[test]
    fn builtin_table_covers_the_known_sources() {
        let factors = EmissionFactors::builtin();
        assert_eq!(factors.intensity("Nuclear"), Some(12.0));
        assert_eq!(factors.intensity("Wind Onshore"), Some(11.0));
        assert_eq!(factors.intensity("Other renewable"), None);
        assert_eq!(factors.intensity("Antimatter"), None);
    }

    #[test]
    fn overrides_replace_builtin_values() {
        let mut overrides = HashMap::new();
        overrides.insert("Solar".to_string(), 35.0);
        overrides.insert("Other renewable".to_string(), 20.0);

        let factors = EmissionFactors::with_overrides(&overrides);
        assert_eq!(factors.intensity("Solar"), Some(35.0));
        assert_eq!(factors.intensity("Other renewable"), Some(20.0));
        assert_eq!(factors.intensity("Nuclear"), Some(12.0));
    }
}
