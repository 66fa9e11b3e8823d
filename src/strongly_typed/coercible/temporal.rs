//! Calendar rules: Time, DateTime and Date targets.
//!
//! Strings without an explicit offset are read as UTC, then normalized to the
//! engine's local offset. Integers are read as compact `YYYYMMDD` dates.

use crate::error::CoercionError;
use crate::types::TypeTag;
use crate::value::Value;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use num::ToPrimitive;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

pub(super) fn to_time(value: &Value, offset: FixedOffset) -> Result<Value, CoercionError> {
    let target = TypeTag::Time;
    let instant = match value {
        Value::Integer(secs) => offset.timestamp_opt(*secs, 0).single(),
        Value::Float(x) => from_epoch_float(*x, offset),
        Value::Rational(r) => r.to_f64().and_then(|x| from_epoch_float(x, offset)),
        Value::BigInteger(_) => None,
        Value::String(s) => Some(
            parse_date_time(s)
                .map_err(|reason| CoercionError::malformed(value, target, reason))?
                .with_timezone(&offset),
        ),
        _ => return Err(CoercionError::unsupported(value, target)),
    };
    instant
        .map(Value::Time)
        .ok_or_else(|| CoercionError::malformed(value, target, "epoch offset out of range"))
}

pub(super) fn to_date_time(value: &Value, offset: FixedOffset) -> Result<Value, CoercionError> {
    let target = TypeTag::DateTime;
    let date_time = match value {
        Value::Time(t) => *t,
        Value::Date(d) => midnight_utc(*d),
        Value::String(s) => {
            parse_date_time(s).map_err(|reason| CoercionError::malformed(value, target, reason))?
        }
        Value::Integer(n) => midnight_utc(compact_date(value, *n, target)?),
        Value::BigInteger(_) => {
            return Err(CoercionError::malformed(
                value,
                target,
                "expected an 8-digit YYYYMMDD date",
            ))
        }
        _ => return Err(CoercionError::unsupported(value, target)),
    };
    Ok(Value::DateTime(date_time.with_timezone(&offset)))
}

pub(super) fn to_date(value: &Value) -> Result<Value, CoercionError> {
    let target = TypeTag::Date;
    let date = match value {
        Value::String(s) => {
            parse_date(s).map_err(|reason| CoercionError::malformed(value, target, reason))?
        }
        Value::Integer(n) => compact_date(value, *n, target)?,
        Value::BigInteger(_) => {
            return Err(CoercionError::malformed(
                value,
                target,
                "expected an 8-digit YYYYMMDD date",
            ))
        }
        _ => return Err(CoercionError::unsupported(value, target)),
    };
    Ok(Value::Date(date))
}

fn from_epoch_float(x: f64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if !x.is_finite() {
        return None;
    }
    let secs = x.floor();
    let nanos = ((x - secs) * NANOS_PER_SEC).round().min(NANOS_PER_SEC - 1.0);
    offset
        .timestamp_opt(secs.to_i64()?, nanos.to_u32()?)
        .single()
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn midnight_utc(date: NaiveDate) -> DateTime<FixedOffset> {
    utc().from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Reads an integer as `YYYYMMDD`. Negative, short, long and impossible
/// calendar values are malformed literals.
fn compact_date(value: &Value, n: i64, target: TypeTag) -> Result<NaiveDate, CoercionError> {
    let digits = n.to_string();
    if n <= 0 || digits.len() != 8 {
        return Err(CoercionError::malformed(
            value,
            target,
            "expected an 8-digit YYYYMMDD date",
        ));
    }
    NaiveDate::parse_from_str(&digits, "%Y%m%d")
        .map_err(|_| CoercionError::malformed(value, target, "invalid calendar date"))
}

/// Parses a calendar date-time. Strings without an offset are UTC; a bare
/// date is midnight UTC.
pub(super) fn parse_date_time(s: &str) -> Result<DateTime<FixedOffset>, &'static str> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty date-time");
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt);
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt);
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(utc().from_utc_datetime(&naive));
    }
    if let Some(date) = parse_date_only(s) {
        return Ok(midnight_utc(date));
    }

    Err("not a date-time literal")
}

/// Parses a calendar date; date-time strings keep their own calendar date.
pub(super) fn parse_date(s: &str) -> Result<NaiveDate, &'static str> {
    let s = s.trim();
    if let Some(date) = parse_date_only(s) {
        return Ok(date);
    }
    parse_date_time(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| "not a date literal")
}

fn parse_date_only(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
