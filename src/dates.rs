use chrono::NaiveDate;
use clap::ValueEnum;
use regex::Regex;
use std::sync::LazyLock;

/// Date layouts recognised inside object keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `YYYYMMDD`
    #[default]
    Default,
    /// `YYYY-MM-DD`
    Hyphen,
    /// `YYYY_MM_DD`
    Underscore,
}

static DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\d{8}"));
static HYPHEN_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\d{4}-\d{2}-\d{2}"));
static UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\d{4}_\d{2}_\d{2}"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static date pattern is valid")
}

impl DateFormat {
    fn pattern(self) -> &'static Regex {
        match self {
            DateFormat::Default => &*DEFAULT_RE,
            DateFormat::Hyphen => &*HYPHEN_RE,
            DateFormat::Underscore => &*UNDERSCORE_RE,
        }
    }

    fn chrono_format(self) -> &'static str {
        match self {
            DateFormat::Default => "%Y%m%d",
            DateFormat::Hyphen => "%Y-%m-%d",
            DateFormat::Underscore => "%Y_%m_%d",
        }
    }
}

/// Pull the first date in `format` out of a file name
///
/// Only the first match is considered; if it is not a real calendar date
/// (e.g. `20231341`) the result is `None`.
#[must_use]
pub fn extract_date_from_string(name: &str, format: DateFormat) -> Option<NaiveDate> {
    let found = format.pattern().find(name)?;
    NaiveDate::parse_from_str(found.as_str(), format.chrono_format()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn default_format_reads_compact_dates() {
        assert_eq!(
            extract_date_from_string("data_report_20230801.csv", DateFormat::Default),
            ymd(2023, 8, 1)
        );
        assert_eq!(
            extract_date_from_string("report.txt", DateFormat::Default),
            None
        );
    }

    #[test]
    fn hyphen_and_underscore_formats() {
        assert_eq!(
            extract_date_from_string("glbx/trades-2024-02-29.dbn.zst", DateFormat::Hyphen),
            ymd(2024, 2, 29)
        );
        assert_eq!(
            extract_date_from_string("glbx/trades_2024_03_15.dbn", DateFormat::Underscore),
            ymd(2024, 3, 15)
        );
        // Formats don't cross over
        assert_eq!(
            extract_date_from_string("trades-2024-02-29", DateFormat::Underscore),
            None
        );
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            extract_date_from_string("20230101-20231231.csv", DateFormat::Default),
            ymd(2023, 1, 1)
        );
    }

    #[test]
    fn impossible_dates_yield_none() {
        assert_eq!(
            extract_date_from_string("dump_20231341.csv", DateFormat::Default),
            None
        );
        assert_eq!(
            extract_date_from_string("dump_2023-02-30.csv", DateFormat::Hyphen),
            None
        );
    }
}
