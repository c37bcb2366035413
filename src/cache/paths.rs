use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Production,
    Emission,
}

impl SeriesKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Emission => "emission",
        }
    }
}

pub(crate) fn entry_file_name(window: &Window, country: &str, kind: SeriesKind) -> String {
    format!("{}_{}_{}.csv", window.timespan(), country, kind.as_str())
}

pub(crate) fn entry_path(dir: &Path, window: &Window, country: &str, kind: SeriesKind) -> PathBuf {
    dir.join(entry_file_name(window, country, kind))
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<(), std::io::Error> {
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::{entry_file_name, SeriesKind};
    use crate::pipeline::Window;

    #[test]
    fn entry_names_follow_the_timespan_country_kind_scheme() {
        let yearly = Window::yearly(2016).expect("valid year");
        assert_eq!(
            entry_file_name(&yearly, "FR", SeriesKind::Production),
            "20160101-20161231_FR_production.csv"
        );

        let monthly = Window::monthly(2016, 2).expect("valid month");
        assert_eq!(
            entry_file_name(&monthly, "DE", SeriesKind::Emission),
            "20160201-20160229_DE_emission.csv"
        );
    }
}
