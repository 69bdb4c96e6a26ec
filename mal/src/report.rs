// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Rendering a [`CheckResult`] as a plain-text report
//!
//! A report has a one-line header, the original, stripped, and annotated listings, and a footer
//! with the error and warning counts and a final verdict.

use crate::CheckResult;
use itertools::Itertools;
use mal_core::Category;
use std::fmt::{self, Display, Write as _};
use std::io::{self, Write};

/// The default text at the end of the report header
pub const DEFAULT_BANNER: &str = "MAL syntax check";

const DIVIDER: &str = "\n-------------\n\n";

/// A calendar date, displayed as `M/D/YYYY`
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct ReportDate {
    year: i32,
    month: u8,
    day: u8,
}

impl ReportDate {
    /// Create a new [`ReportDate`], or [`None`] if `month` or `day` is out of range
    ///
    /// ```
    /// use mal::report::ReportDate;
    /// assert_eq!(ReportDate::new(2026, 2, 9).unwrap().to_string(), "2/9/2026");
    /// assert!(ReportDate::new(2026, 2, 30).is_none());
    /// ```
    #[must_use]
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
        let days_in_month = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if leap => 29,
            2 => 28,
            _ => return None,
        };
        (1..=days_in_month)
            .contains(&day)
            .then_some(Self { year, month, day })
    }

    /// The date `days` days after 1970-01-01
    ///
    /// ```
    /// use mal::report::ReportDate;
    /// assert_eq!(ReportDate::from_unix_days(0), ReportDate::new(1970, 1, 1).unwrap());
    /// assert_eq!(ReportDate::from_unix_days(20_744), ReportDate::new(2026, 10, 18).unwrap());
    /// ```
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "values are range-limited by the calendar arithmetic"
    )]
    pub fn from_unix_days(days: i64) -> Self {
        // shift the epoch to 0000-03-01, so leap days fall at the end of each 400-year era
        let days = days + 719_468;
        let era = days.div_euclid(146_097);
        let day_of_era = days.rem_euclid(146_097);
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let shifted_month = (5 * day_of_year + 2) / 153;
        let day = (day_of_year - (153 * shifted_month + 2) / 5 + 1) as u8;
        let month = (if shifted_month < 10 {
            shifted_month + 3
        } else {
            shifted_month - 9
        }) as u8;
        let year = year_of_era + era * 400 + i64::from(month <= 2);
        Self {
            year: year as i32,
            month,
            day,
        }
    }
}

impl Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}

/// A syntax report for one checked program
#[derive(Debug, Clone)]
pub struct SyntaxReport<'a> {
    /// The name of the checked source file
    pub source_name: String,
    /// The name of the file the report is written to
    pub report_name: String,
    /// The date shown in the header
    pub date: ReportDate,
    /// Free text at the end of the header
    pub banner: String,
    /// The result being reported on
    pub result: &'a CheckResult,
}

impl<'a> SyntaxReport<'a> {
    /// Create a new [`SyntaxReport`] with the [default banner](DEFAULT_BANNER)
    pub fn new(
        source_name: impl Into<String>,
        report_name: impl Into<String>,
        date: ReportDate,
        result: &'a CheckResult,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            report_name: report_name.into(),
            date,
            banner: String::from(DEFAULT_BANNER),
            result,
        }
    }

    /// Replace the header banner
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Write the report to `writer`
    ///
    /// The whole report is rendered before anything is written.
    ///
    /// # Errors
    ///
    /// Returns any error encountered while writing.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let rendered = self.to_string();
        writer.write_all(rendered.as_bytes())?;
        writer.flush()
    }

    fn footer(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        write!(f, "line count = {}\n\n", result.line_count())?;

        writeln!(f, "total errors = {}", result.total_errors())?;
        if result.total_errors() > 0 {
            write_counts(f, result.errors.nonzero())?;
            writeln!(f)?;
        }

        writeln!(f, "total warnings = {}", result.total_warnings())?;
        write_counts(f, result.warnings.nonzero())?;

        let verdict = if result.is_valid() { "is valid" } else { "is not valid" };
        write!(f, "\nProcessing complete - MAL program {verdict}.")
    }
}

fn write_counts<K: Category>(
    f: &mut impl fmt::Write,
    counts: impl Iterator<Item = (K, usize)>,
) -> fmt::Result {
    for (kind, count) in counts {
        writeln!(f, "   {count} {}", kind.name())?;
    }
    Ok(())
}

impl Display for SyntaxReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} - {} - {} - {}",
            self.source_name, self.report_name, self.date, self.banner
        )?;

        let result = self.result;
        let sections = [
            ("original MAL program listing:", result.original.iter().join("\n")),
            ("stripped MAL program listing:", result.normalized.iter().join("\n")),
            ("error report listing:", result.annotated.iter().join("\n")),
        ];
        for (title, rows) in sections {
            write!(f, "{DIVIDER}{title}\n\n")?;
            if !rows.is_empty() {
                f.write_str(&rows)?;
                f.write_char('\n')?;
            }
        }

        f.write_str(DIVIDER)?;
        self.footer(f)
    }
}
