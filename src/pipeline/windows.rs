use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Contiguous [start, end] request range; both bounds are midnight UTC and the
/// end bound names the last day of the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Window {
    pub fn yearly(year: i32) -> Option<Self> {
        let start = midnight_utc(year, 1, 1)?;
        let end = midnight_utc(year, 12, 31)?;
        Some(Self { start, end })
    }

    pub fn monthly(year: i32, month: u32) -> Option<Self> {
        let start = midnight_utc(year, month, 1)?;
        let end = midnight_utc(year, month, days_in_month(year, month)?)?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// `YYYYMMDD-YYYYMMDD` label used in cache and chart file names.
    pub fn timespan(&self) -> String {
        format!(
            "{}-{}",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }
}

fn midnight_utc(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let naive = date.and_hms_opt(0, 0, 0)?;
    Utc.from_local_datetime(&naive).single()
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next_month.signed_duration_since(first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, Window};

    #[test]
    fn yearly_window_spans_january_first_to_december_31() {
        let window = Window::yearly(2019).expect("valid year");
        assert_eq!(window.timespan(), "20190101-20191231");
        assert_eq!(window.year(), 2019);
    }

    #[test]
    fn monthly_window_ends_on_the_last_day_of_the_month() {
        let window = Window::monthly(2019, 4).expect("valid month");
        assert_eq!(window.timespan(), "20190401-20190430");
    }

    #[test]
    fn february_respects_leap_years() {
        assert_eq!(days_in_month(2020, 2), Some(29));
        assert_eq!(days_in_month(2019, 2), Some(28));
        assert_eq!(
            Window::monthly(2020, 2).expect("valid month").timespan(),
            "20200201-20200229"
        );
    }

    #[test]
    fn invalid_month_yields_no_window() {
        assert!(Window::monthly(2019, 13).is_none());
    }
}
