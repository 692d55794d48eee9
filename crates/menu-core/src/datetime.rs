//! Date and time entry and display
//!
//! Typed input follows one fixed layout, `yyyy mo dd hh mm ss`: a four digit
//! year, then five two digit fields, each pair separated by exactly one
//! arbitrary character. No other layouts are recognised.
//!
//! The scanned fields are handed to the [`TimeService`] as a
//! [`BrokenDownTime`], the `struct tm` shaped representation in which the
//! year counts from 1900 and the month from zero.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::error::MenuError;

/// Number of fields in a date/time entry
pub const FIELD_COUNT: usize = 6;

/// Maximum characters consumed by each field (sign included)
const FIELD_WIDTHS: [usize; FIELD_COUNT] = [4, 2, 2, 2, 2, 2];

/// Display layout, e.g. `March 15 2024 10:30:00 (Friday)`
pub const DISPLAY_FORMAT: &str = "%B %d %Y %T (%A)";

/// Result of scanning a typed date/time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields {
    /// Year, month (1-based), day, hour, minute, second
    pub values: [i32; FIELD_COUNT],
    /// How many leading fields were actually present in the text
    pub matched: usize,
}

impl DateFields {
    pub fn is_complete(&self) -> bool {
        self.matched == FIELD_COUNT
    }
}

/// Scan `yyyy mo dd hh mm ss` positionally
///
/// Scanning stops at the first field without digits or at end of input.
/// Fields that were not reached stay zero.
pub fn scan_datetime(text: &str) -> DateFields {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut fields = DateFields {
        values: [0; FIELD_COUNT],
        matched: 0,
    };

    for (i, &width) in FIELD_WIDTHS.iter().enumerate() {
        if i > 0 {
            // one separator of any kind
            if pos >= bytes.len() {
                break;
            }
            pos += 1;
        }
        match scan_field(bytes, &mut pos, width) {
            Some(value) => {
                fields.values[i] = value;
                fields.matched += 1;
            }
            None => break,
        }
    }

    fields
}

/// Read one signed decimal of at most `width` characters
fn scan_field(bytes: &[u8], pos: &mut usize, width: usize) -> Option<i32> {
    while *pos < bytes.len() && bytes[*pos].is_ascii_whitespace() {
        *pos += 1;
    }

    let mut used = 0;
    let mut negative = false;
    if let Some(&sign @ (b'+' | b'-')) = bytes.get(*pos) {
        negative = sign == b'-';
        *pos += 1;
        used += 1;
    }

    let mut value: i32 = 0;
    let mut digits = 0;
    while used < width {
        match bytes.get(*pos) {
            Some(&b) if b.is_ascii_digit() => {
                value = value * 10 + i32::from(b - b'0');
                *pos += 1;
                used += 1;
                digits += 1;
            }
            _ => break,
        }
    }

    if digits == 0 {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Calendar time split into fields, `struct tm` style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrokenDownTime {
    /// Years since 1900
    pub year: i32,
    /// Month, 0 = January
    pub month: i32,
    /// Day of month, 1-based
    pub day: i32,
    /// Hour, 0-23
    pub hour: i32,
    /// Minute, 0-59
    pub minute: i32,
    /// Second, 0-59
    pub second: i32,
}

impl BrokenDownTime {
    /// Convert typed fields (calendar year, 1-based month) to the tm layout
    pub fn from_fields(fields: &DateFields) -> Self {
        let [year, month, day, hour, minute, second] = fields.values;
        Self {
            year: year - 1900,
            month: month - 1,
            day,
            hour,
            minute,
            second,
        }
    }

    pub fn from_naive(time: &NaiveDateTime) -> Self {
        Self {
            year: time.year() - 1900,
            month: time.month0() as i32,
            day: time.day() as i32,
            hour: time.hour() as i32,
            minute: time.minute() as i32,
            second: time.second() as i32,
        }
    }

    /// Resolve to a calendar time
    ///
    /// Out-of-range fields carry into the next larger unit, so month 12 is
    /// January of the following year and day 0 is the last day of the
    /// previous month.
    pub fn to_naive(&self) -> Result<NaiveDateTime, MenuError> {
        let out_of_range = || MenuError::TimeOutOfRange(format!("{:?}", self));

        let months = (i64::from(self.year) + 1900) * 12 + i64::from(self.month);
        let year = i32::try_from(months.div_euclid(12)).map_err(|_| out_of_range())?;
        let month = months.rem_euclid(12) as u32 + 1;

        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(out_of_range)?;

        let offset = TimeDelta::days(i64::from(self.day) - 1)
            + TimeDelta::hours(i64::from(self.hour))
            + TimeDelta::minutes(i64::from(self.minute))
            + TimeDelta::seconds(i64::from(self.second));

        start.checked_add_signed(offset).ok_or_else(out_of_range)
    }
}

/// Format a time the way the menu displays it
pub fn format_datetime(time: &NaiveDateTime) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}

/// Real-time clock of the board
pub trait TimeService {
    /// Current wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// Move the clock so that it reads `time` from now on
    fn adjust(&mut self, time: NaiveDateTime);

    /// Commit a broken-down time
    fn set(&mut self, time: &BrokenDownTime) -> Result<(), MenuError> {
        let resolved = time.to_naive()?;
        self.adjust(resolved);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_scan_full_entry() {
        let fields = scan_datetime("2024 03 15 10 30 00");
        assert_eq!(fields.values, [2024, 3, 15, 10, 30, 0]);
        assert!(fields.is_complete());
    }

    #[test]
    fn test_scan_other_separators() {
        let fields = scan_datetime("2024-03-15T10:30:05");
        assert_eq!(fields.values, [2024, 3, 15, 10, 30, 5]);
        assert!(fields.is_complete());
    }

    #[test]
    fn test_scan_fixed_width_without_separators_misaligns() {
        // The separator slot swallows a digit: "202403151030" is not accepted
        // as a compact layout.
        let fields = scan_datetime("202403151030");
        assert_eq!(fields.values[0], 2024);
        assert_eq!(fields.values[1], 31);
        assert_eq!(fields.values[2], 10);
    }

    #[test]
    fn test_scan_leading_whitespace_skipped() {
        let fields = scan_datetime("\r\n 2024 1 2 3 4 5");
        assert_eq!(fields.values, [2024, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_scan_partial_zero_fills() {
        let fields = scan_datetime("2024 03");
        assert_eq!(fields.values, [2024, 3, 0, 0, 0, 0]);
        assert_eq!(fields.matched, 2);
        assert!(!fields.is_complete());
    }

    #[test]
    fn test_scan_empty() {
        let fields = scan_datetime("");
        assert_eq!(fields.values, [0; FIELD_COUNT]);
        assert_eq!(fields.matched, 0);
    }

    #[test]
    fn test_scan_stops_at_non_digit_field() {
        let fields = scan_datetime("2024 xx 15 10 30 00");
        assert_eq!(fields.matched, 1);
        assert_eq!(fields.values, [2024, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_broken_down_offsets() {
        let tm = BrokenDownTime::from_fields(&scan_datetime("2024 03 15 10 30 00"));
        assert_eq!(tm.year, 124);
        assert_eq!(tm.month, 2);
        assert_eq!(tm.day, 15);
        assert_eq!(tm.to_naive().unwrap(), naive(2024, 3, 15, 10, 30, 0));
    }

    #[test]
    fn test_broken_down_normalizes_overflow() {
        let tm = BrokenDownTime {
            year: 123,
            month: 12,
            day: 0,
            hour: 24,
            minute: 60,
            second: 0,
        };
        // month 12 of 2023 -> January 2024, day 0 -> December 31 2023,
        // +24h -> January 1 2024, +60min -> 01:00
        assert_eq!(tm.to_naive().unwrap(), naive(2024, 1, 1, 1, 0, 0));
    }

    #[test]
    fn test_broken_down_negative_month() {
        let tm = BrokenDownTime {
            year: 124,
            month: -1,
            day: 1,
            ..Default::default()
        };
        assert_eq!(tm.to_naive().unwrap(), naive(2023, 12, 1, 0, 0, 0));
    }

    #[test]
    fn test_broken_down_out_of_range() {
        let tm = BrokenDownTime {
            year: i32::MAX - 1900,
            ..Default::default()
        };
        assert!(matches!(tm.to_naive(), Err(MenuError::TimeOutOfRange(_))));
    }

    #[test]
    fn test_from_naive_roundtrip_fields() {
        let time = naive(1999, 12, 31, 23, 59, 58);
        let tm = BrokenDownTime::from_naive(&time);
        assert_eq!(tm.year, 99);
        assert_eq!(tm.month, 11);
        assert_eq!(tm.to_naive().unwrap(), time);
    }

    #[test]
    fn test_format_datetime() {
        let time = naive(2024, 3, 15, 10, 30, 0);
        assert_eq!(format_datetime(&time), "March 15 2024 10:30:00 (Friday)");
    }

    #[test]
    fn test_format_pads_day_and_time() {
        let time = naive(2021, 6, 5, 7, 8, 9);
        assert_eq!(format_datetime(&time), "June 05 2021 07:08:09 (Saturday)");
    }

    proptest! {
        #[test]
        fn scan_reads_back_formatted_fields(
            y in 1000i32..10000,
            mo in 1i32..13,
            d in 1i32..29,
            h in 0i32..24,
            mi in 0i32..60,
            s in 0i32..60,
        ) {
            let text = format!("{:04} {:02} {:02} {:02} {:02} {:02}", y, mo, d, h, mi, s);
            let fields = scan_datetime(&text);
            prop_assert!(fields.is_complete());
            prop_assert_eq!(fields.values, [y, mo, d, h, mi, s]);
        }

        #[test]
        fn scan_never_panics(text in ".{0,40}") {
            let fields = scan_datetime(&text);
            prop_assert!(fields.matched <= FIELD_COUNT);
        }
    }
}
