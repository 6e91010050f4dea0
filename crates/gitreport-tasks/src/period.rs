// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report periods
//!
//! Computes the inclusive day window a report covers from the report kind,
//! offsets counted back from today, and the configured first day of the week.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use gitreport_git::DateWindow;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ReportError;

/// Length of a report period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodKind {
    /// One calendar day
    #[serde(rename = "daily")]
    Day,
    /// Seven days from the configured week start
    #[default]
    #[serde(rename = "weekly")]
    Week,
    /// One calendar month
    #[serde(rename = "monthly")]
    Month,
}

impl PeriodKind {
    /// Parse a stat mode, falling back to weekly reports for unknown values
    #[must_use]
    pub fn from_mode(mode: &str) -> Self {
        mode.parse().unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to weekly report");
            Self::Week
        })
    }

    /// Report type label, also used in report file names
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "daily",
            Self::Week => "weekly",
            Self::Month => "monthly",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PeriodKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" | "日" | "日报" => Ok(Self::Day),
            "week" | "weekly" | "周" | "周报" => Ok(Self::Week),
            "month" | "monthly" | "月" | "月报" => Ok(Self::Month),
            other => Err(format!("unknown stat mode: {other}")),
        }
    }
}

/// Offsets and week layout used to place a period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodOptions {
    /// First day of the week, Monday = 0 through Sunday = 6
    pub week_start: u32,
    /// Whole weeks to go back
    pub week_offset: u32,
    /// Whole months to go back
    pub month_offset: u32,
    /// Whole days to go back
    pub day_offset: u32,
}

/// The period a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    /// Period length
    pub kind: PeriodKind,
    /// Days covered
    pub window: DateWindow,
}

impl ReportPeriod {
    /// Place a period of `kind` relative to `today`
    ///
    /// # Errors
    ///
    /// Returns `ReportError::PeriodOutOfRange` if an offset leaves the
    /// supported calendar range.
    pub fn relative_to(kind: PeriodKind, options: &PeriodOptions, today: NaiveDate) -> Result<Self, ReportError> {
        let window = match kind {
            PeriodKind::Day => day_range(today, options.day_offset)?,
            PeriodKind::Week => week_range(today, options.week_start, options.week_offset)?,
            PeriodKind::Month => month_range(today, options.month_offset)?,
        };
        Ok(Self { kind, window })
    }
}

fn out_of_range(today: NaiveDate, offset: u32, unit: &'static str) -> ReportError {
    ReportError::PeriodOutOfRange { today, offset, unit }
}

/// The single day `offset` days before `today`
///
/// # Errors
///
/// Returns `ReportError::PeriodOutOfRange` on calendar overflow.
pub fn day_range(today: NaiveDate, offset: u32) -> Result<DateWindow, ReportError> {
    let day = today
        .checked_sub_days(Days::new(u64::from(offset)))
        .ok_or_else(|| out_of_range(today, offset, "days"))?;
    Ok(DateWindow::single_day(day))
}

/// The week containing `today`, moved back `offset` weeks
///
/// `week_start` is the first weekday (Monday = 0); values above 6 wrap.
///
/// # Errors
///
/// Returns `ReportError::PeriodOutOfRange` on calendar overflow.
pub fn week_range(today: NaiveDate, week_start: u32, offset: u32) -> Result<DateWindow, ReportError> {
    let weekday = today.weekday().num_days_from_monday();
    let days_since_start = (weekday + 7 - week_start % 7) % 7;
    let back = u64::from(days_since_start) + 7 * u64::from(offset);
    let start = today
        .checked_sub_days(Days::new(back))
        .ok_or_else(|| out_of_range(today, offset, "weeks"))?;
    let end = start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| out_of_range(today, offset, "weeks"))?;
    Ok(DateWindow::new(start, end)?)
}

/// The calendar month containing `today`, moved back `offset` months
///
/// # Errors
///
/// Returns `ReportError::PeriodOutOfRange` on calendar overflow.
pub fn month_range(today: NaiveDate, offset: u32) -> Result<DateWindow, ReportError> {
    let this_month = today
        .with_day(1)
        .ok_or_else(|| out_of_range(today, offset, "months"))?;
    let start = this_month
        .checked_sub_months(Months::new(offset))
        .ok_or_else(|| out_of_range(today, offset, "months"))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| out_of_range(today, offset, "months"))?;
    Ok(DateWindow::new(start, end)?)
}
