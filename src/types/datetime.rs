//! XMP date/time values
//!
//! XMP dates follow a subset of ISO 8601 where every component after the
//! year is optional:
//! - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
//! - `YYYY-MM-DDThh:mm`, `YYYY-MM-DDThh:mm:ss`, `YYYY-MM-DDThh:mm:ss.s+`
//! - any time followed by `Z` or `+hh:mm` / `-hh:mm`
//!
//! Parsing and formatting preserve exactly which components were present, so
//! a value written back is spelled the way it was read (trailing zeros of the
//! fractional seconds aside).

use crate::core::decoder::Decoder;
use crate::core::encoder::Encoder;
use crate::core::error::{XmpError, XmpResult};
use crate::core::node::QName;
use crate::core::property::{Property, PropertyRef, XmpProperty};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// XMP date/time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct XmpDateTime {
    /// Year
    pub year: i32,
    /// Month (1-12), 0 when absent
    pub month: u8,
    /// Day (1-31), 0 when absent
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    /// Nanosecond (0-999,999,999)
    pub nanosecond: u32,
    /// Whether the date part is present
    pub has_date: bool,
    /// Whether the time part is present
    pub has_time: bool,
    /// Whether seconds were written
    pub has_seconds: bool,
    /// Whether a timezone is present
    pub has_timezone: bool,
    /// Timezone sign: -1 west, 0 UTC, 1 east
    pub tz_sign: i8,
    /// Timezone hour offset
    pub tz_hour: u8,
    /// Timezone minute offset
    pub tz_minute: u8,
}

/// Cursor over the ASCII bytes of a date string
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, after: &str) -> XmpResult<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(XmpError::BadValue(format!(
                "Invalid date string, expected '{}' after {}",
                byte as char, after
            )))
        }
    }

    /// Read a run of digits, returning its value and length
    fn digits(&mut self, what: &str) -> XmpResult<(u64, usize)> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let run = &self.bytes[start..self.pos];
        if run.is_empty() || run.len() > 18 {
            return Err(XmpError::BadValue(format!("Invalid {} in date string", what)));
        }
        let value = run
            .iter()
            .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));
        Ok((value, run.len()))
    }

    fn number(&mut self, what: &str, max: u64) -> XmpResult<u8> {
        let (value, _) = self.digits(what)?;
        if value > max {
            return Err(XmpError::BadValue(format!("{} is out of range", what)));
        }
        Ok(value as u8)
    }
}

impl XmpDateTime {
    /// Create an empty date/time
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calendar date
    pub fn date(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            has_date: true,
            ..Self::default()
        }
    }

    /// Add a wall clock time with seconds
    pub fn at(mut self, hour: u8, minute: u8, second: u8) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self.has_time = true;
        self.has_seconds = true;
        self
    }

    /// Add a timezone offset in minutes east of UTC; 0 means `Z`
    pub fn with_offset(mut self, minutes: i32) -> Self {
        self.has_timezone = true;
        self.tz_sign = minutes.signum() as i8;
        self.tz_hour = (minutes.unsigned_abs() / 60) as u8;
        self.tz_minute = (minutes.unsigned_abs() % 60) as u8;
        self
    }

    /// Parse an XMP date/time string
    ///
    /// # Errors
    ///
    /// Returns `BadValue` if the string is not a valid XMP date.
    pub fn parse(s: &str) -> XmpResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(XmpError::BadValue("Empty date string".to_string()));
        }
        let mut dt = XmpDateTime::new();
        let mut sc = Scanner {
            bytes: s.as_bytes(),
            pos: 0,
        };

        // time-only values start with T or hh:
        let time_only = s.starts_with('T') || s.as_bytes().get(2) == Some(&b':');
        if !time_only {
            let negative = sc.eat(b'-');
            let (year, _) = sc.digits("year")?;
            let year = i32::try_from(year)
                .map_err(|_| XmpError::BadValue("Year is out of range".to_string()))?;
            dt.year = if negative { -year } else { year };
            dt.has_date = true;

            if sc.eat(b'-') {
                dt.month = sc.number("Month", 12)?;
                if dt.month == 0 {
                    return Err(XmpError::BadValue("Month is out of range".to_string()));
                }
                if sc.eat(b'-') {
                    dt.day = sc.number("Day", 31)?;
                    if dt.day == 0 {
                        return Err(XmpError::BadValue("Day is out of range".to_string()));
                    }
                }
            }
            if sc.done() {
                return Ok(dt);
            }
            sc.expect(b'T', "date")?;
        } else {
            sc.eat(b'T');
        }

        dt.has_time = true;
        dt.hour = sc.number("Hour", 23)?;
        sc.expect(b':', "hour")?;
        dt.minute = sc.number("Minute", 59)?;

        if sc.eat(b':') {
            dt.has_seconds = true;
            dt.second = sc.number("Second", 59)?;
            if sc.eat(b'.') {
                let (mut frac, digits) = sc.digits("fractional second")?;
                // normalize to nanoseconds
                if digits > 9 {
                    frac /= 10u64.pow((digits - 9) as u32);
                } else {
                    frac *= 10u64.pow((9 - digits) as u32);
                }
                dt.nanosecond = frac as u32;
            }
        }

        if sc.done() {
            return Ok(dt);
        }

        dt.has_timezone = true;
        if sc.eat(b'Z') {
            dt.tz_sign = 0;
        } else {
            dt.tz_sign = match sc.peek() {
                Some(b'+') => 1,
                Some(b'-') => -1,
                _ => {
                    return Err(XmpError::BadValue(
                        "Invalid date string, expected timezone".to_string(),
                    ));
                }
            };
            sc.pos += 1;
            dt.tz_hour = sc.number("Timezone hour", 23)?;
            sc.expect(b':', "timezone hour")?;
            dt.tz_minute = sc.number("Timezone minute", 59)?;
        }

        if !sc.done() {
            return Err(XmpError::BadValue(
                "Invalid date string, extra characters at end".to_string(),
            ));
        }
        Ok(dt)
    }

    /// Format an XMP date/time to string
    pub fn format(&self) -> String {
        let mut result = String::new();

        if self.has_date {
            if self.year < 0 {
                result.push_str(&format!("-{:04}", -i64::from(self.year)));
            } else {
                result.push_str(&format!("{:04}", self.year));
            }
            if self.month != 0 {
                result.push_str(&format!("-{:02}", self.month));
                if self.day != 0 {
                    result.push_str(&format!("-{:02}", self.day));
                }
            }
        }

        if self.has_time {
            result.push('T');
            result.push_str(&format!("{:02}:{:02}", self.hour, self.minute));
            if self.has_seconds || self.second != 0 || self.nanosecond != 0 {
                result.push_str(&format!(":{:02}", self.second));
                if self.nanosecond != 0 {
                    let fraction = format!("{:09}", self.nanosecond);
                    result.push('.');
                    result.push_str(fraction.trim_end_matches('0'));
                }
            }

            if self.has_timezone {
                if self.tz_sign == 0 {
                    result.push('Z');
                } else {
                    let sign = if self.tz_sign < 0 { '-' } else { '+' };
                    result.push_str(&format!("{}{:02}:{:02}", sign, self.tz_hour, self.tz_minute));
                }
            }
        }

        result
    }

    /// Whether no component is present
    pub fn is_zero(&self) -> bool {
        !self.has_date && !self.has_time
    }
}

impl fmt::Display for XmpDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for XmpDateTime {
    type Err = XmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for XmpDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for XmpDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(Self::default());
        }
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl XmpProperty for XmpDateTime {
    fn is_zero(&self) -> bool {
        XmpDateTime::is_zero(self)
    }

    fn marshal_xmp(&self, _enc: &mut Encoder, _name: &QName) -> XmpResult<Property> {
        Ok(Property::Attr(self.format()))
    }

    fn unmarshal_xmp(_dec: &mut Decoder, prop: PropertyRef<'_>) -> XmpResult<Self> {
        Self::parse(prop.simple_value()?)
    }
}
