//! Numeric rules: Integer, Float, Rational and Complex targets.

use crate::error::CoercionError;
use crate::types::TypeTag;
use crate::value::Value;
use num::complex::Complex64;
use num::{BigInt, BigRational, FromPrimitive, Num, ToPrimitive, Zero};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

pub(super) fn to_integer(value: &Value) -> Result<Value, CoercionError> {
    let target = TypeTag::Integer;
    match value {
        Value::String(s) => parse_integer(s)
            .map(Value::integer)
            .ok_or_else(|| CoercionError::malformed(value, target, "not an integer literal")),
        Value::Float(x) => float_to_integer(value, *x),
        Value::Rational(r) => Ok(Value::integer(r.to_integer())),
        Value::Complex(c) if c.im == 0.0 => float_to_integer(value, c.re),
        Value::Complex(_) => Err(CoercionError::malformed(
            value,
            target,
            "imaginary part is not zero",
        )),
        Value::Time(t) => Ok(Value::Integer(t.timestamp())),
        _ => Err(CoercionError::unsupported(value, target)),
    }
}

pub(super) fn to_float(value: &Value) -> Result<Value, CoercionError> {
    let target = TypeTag::Float;
    let x = match value {
        Value::String(s) => parse_float(s)
            .ok_or_else(|| CoercionError::malformed(value, target, "not a float literal"))?,
        Value::Integer(n) => *n as f64,
        Value::BigInteger(n) => finite(n.to_f64())
            .ok_or_else(|| CoercionError::malformed(value, target, "out of range"))?,
        Value::Rational(r) => finite(r.to_f64())
            .ok_or_else(|| CoercionError::malformed(value, target, "out of range"))?,
        Value::Complex(c) if c.im == 0.0 => c.re,
        Value::Complex(_) => {
            return Err(CoercionError::malformed(
                value,
                target,
                "imaginary part is not zero",
            ))
        }
        Value::Time(t) => {
            t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) / NANOS_PER_SEC
        }
        _ => return Err(CoercionError::unsupported(value, target)),
    };
    Ok(Value::Float(x))
}

pub(super) fn to_rational(value: &Value) -> Result<Value, CoercionError> {
    let target = TypeTag::Rational;
    let r = match value {
        Value::Integer(n) => BigRational::from_integer(BigInt::from(*n)),
        Value::BigInteger(n) => BigRational::from_integer(n.clone()),
        Value::Float(x) => BigRational::from_float(*x)
            .ok_or_else(|| CoercionError::malformed(value, target, "not a finite number"))?,
        Value::Complex(c) if c.im == 0.0 => BigRational::from_float(c.re)
            .ok_or_else(|| CoercionError::malformed(value, target, "not a finite number"))?,
        Value::Complex(_) => {
            return Err(CoercionError::malformed(
                value,
                target,
                "imaginary part is not zero",
            ))
        }
        Value::String(s) => {
            parse_rational(s).map_err(|reason| CoercionError::malformed(value, target, reason))?
        }
        _ => return Err(CoercionError::unsupported(value, target)),
    };
    Ok(Value::Rational(r))
}

pub(super) fn to_complex(value: &Value) -> Result<Value, CoercionError> {
    let target = TypeTag::Complex;
    let real = |x: Option<f64>| {
        finite(x)
            .map(|re| Value::Complex(Complex64::new(re, 0.0)))
            .ok_or_else(|| CoercionError::malformed(value, target, "not a finite number"))
    };
    match value {
        Value::Integer(n) => real(Some(*n as f64)),
        Value::BigInteger(n) => real(n.to_f64()),
        Value::Float(x) => real(Some(*x)),
        Value::Rational(r) => real(r.to_f64()),
        Value::String(s) => {
            let c = s
                .trim()
                .parse::<Complex64>()
                .map_err(|_| CoercionError::malformed(value, target, "not a complex literal"))?;
            if !c.is_finite() {
                return Err(CoercionError::malformed(value, target, "not a finite number"));
            }
            Ok(Value::Complex(c))
        }
        _ => Err(CoercionError::unsupported(value, target)),
    }
}

fn float_to_integer(value: &Value, x: f64) -> Result<Value, CoercionError> {
    if !x.is_finite() {
        return Err(CoercionError::malformed(
            value,
            TypeTag::Integer,
            "not a finite number",
        ));
    }
    BigInt::from_f64(x.trunc())
        .map(Value::integer)
        .ok_or_else(|| CoercionError::malformed(value, TypeTag::Integer, "out of range"))
}

fn finite(x: Option<f64>) -> Option<f64> {
    x.filter(|x| x.is_finite())
}

/// Strips `_` digit separators, which may only sit between two digits.
fn strip_separators(literal: &str, is_digit: impl Fn(char) -> bool) -> Option<String> {
    let chars: Vec<char> = literal.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if *c != '_' {
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j)).copied();
        let after = chars.get(i + 1).copied();
        if !(before.is_some_and(|b| is_digit(b)) && after.is_some_and(|a| is_digit(a))) {
            return None;
        }
    }
    Some(literal.replace('_', ""))
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

/// Parses integer literals: optional sign, `0x`/`0b`/`0o` prefixes and `_`
/// separators. Leading zeros are decimal.
pub(super) fn parse_integer(s: &str) -> Option<BigInt> {
    let (negative, body) = split_sign(s.trim());
    let lower = body.to_ascii_lowercase();
    let (radix, digits) = match lower.get(..2) {
        Some("0x") => (16, &lower[2..]),
        Some("0b") => (2, &lower[2..]),
        Some("0o") => (8, &lower[2..]),
        _ => (10, lower.as_str()),
    };
    let digits = strip_separators(digits, |c| c.is_digit(radix))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let n = BigInt::from_str_radix(&digits, radix).ok()?;
    Some(if negative { -n } else { n })
}

/// Parses decimal float literals (`1.5`, `-2e3`, `1_000.25`) and any integer
/// literal `parse_integer` accepts.
pub(super) fn parse_float(s: &str) -> Option<f64> {
    if let Some(n) = parse_integer(s) {
        return finite(n.to_f64());
    }
    let trimmed = s.trim();
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-' | '_');
    if trimmed.is_empty() || !trimmed.chars().all(allowed) {
        return None;
    }
    let cleaned = strip_separators(trimmed, |c| c.is_ascii_digit())?;
    cleaned.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Parses `n/d`, decimal (`0.75`) or integer literals into an exact rational.
pub(super) fn parse_rational(s: &str) -> Result<BigRational, &'static str> {
    let trimmed = s.trim();
    match trimmed.split_once('/') {
        Some((numer, denom)) => {
            let numer = parse_decimal(numer).ok_or("not a rational literal")?;
            let denom = parse_integer(denom).ok_or("not a rational literal")?;
            if denom.is_zero() {
                return Err("divided by 0");
            }
            Ok(numer / BigRational::from_integer(denom))
        }
        None => parse_decimal(trimmed).ok_or("not a rational literal"),
    }
}

fn parse_decimal(s: &str) -> Option<BigRational> {
    let (negative, body) = split_sign(s.trim());
    let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
    if whole.is_empty() {
        return None;
    }
    let whole = strip_separators(whole, |c| c.is_ascii_digit())?;
    let frac = if frac.is_empty() {
        String::new()
    } else {
        strip_separators(frac, |c| c.is_ascii_digit())?
    };
    let all_digits = |d: &str| d.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !all_digits(&whole) || !all_digits(&frac) {
        return None;
    }

    let numer = BigInt::from_str_radix(&format!("{}{}", whole, frac), 10).ok()?;
    let denom = num::pow(BigInt::from(10), frac.len());
    let r = BigRational::new(numer, denom);
    Some(if negative { -r } else { r })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn integer_literals() {
        assert_eq!(parse_integer("1122"), Some(big(1122)));
        assert_eq!(parse_integer(" -42 "), Some(big(-42)));
        assert_eq!(parse_integer("+7"), Some(big(7)));
        assert_eq!(parse_integer("1_000"), Some(big(1000)));
        assert_eq!(parse_integer("0x1A"), Some(big(26)));
        assert_eq!(parse_integer("0b101"), Some(big(5)));
        assert_eq!(parse_integer("0o17"), Some(big(15)));
        assert_eq!(parse_integer("017"), Some(big(17)));
    }

    #[test]
    fn integer_literal_rejections() {
        for bad in ["", "12abc", "1.5", "_1", "1_", "1__0", "0x", "0b102", "--1", "abc"] {
            assert_eq!(parse_integer(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn float_literals() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("1_000.5"), Some(1000.5));
        assert_eq!(parse_float("0x10"), Some(16.0));
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float("1.2.3"), None);
    }

    #[test]
    fn rational_literals() {
        assert_eq!(
            parse_rational("1/3").unwrap(),
            BigRational::new(big(1), big(3))
        );
        assert_eq!(
            parse_rational("0.75").unwrap(),
            BigRational::new(big(3), big(4))
        );
        assert_eq!(
            parse_rational("-2").unwrap(),
            BigRational::from_integer(big(-2))
        );
        assert_eq!(parse_rational("1/0"), Err("divided by 0"));
        assert!(parse_rational("one/two").is_err());
        assert!(parse_rational(".5").is_err());
    }

    #[test]
    fn floats_truncate_to_integers() {
        assert_eq!(to_integer(&Value::Float(100.0)).unwrap(), Value::Integer(100));
        assert_eq!(to_integer(&Value::Float(-2.9)).unwrap(), Value::Integer(-2));
        assert!(to_integer(&Value::Float(f64::NAN)).is_err());
        assert!(matches!(
            to_integer(&Value::Float(1e30)).unwrap(),
            Value::BigInteger(_)
        ));
    }

    #[test]
    fn huge_integer_strings_become_big() {
        let v = to_integer(&Value::from("12157665459056928801")).unwrap();
        assert_eq!(v, Value::BigInteger(BigInt::from(9).pow(20)));
    }

    #[test]
    fn rational_from_float_is_exact() {
        assert_eq!(
            to_rational(&Value::Float(100.5)).unwrap(),
            Value::Rational(BigRational::new(big(201), big(2)))
        );
        assert_eq!(
            to_rational(&Value::Integer(100)).unwrap(),
            Value::Rational(BigRational::from_integer(big(100)))
        );
    }

    #[test]
    fn complex_from_reals() {
        assert_eq!(
            to_complex(&Value::Integer(100)).unwrap(),
            Value::Complex(Complex64::new(100.0, 0.0))
        );
        assert_eq!(
            to_complex(&Value::from("1+2i")).unwrap(),
            Value::Complex(Complex64::new(1.0, 2.0))
        );
        assert!(to_complex(&Value::Boolean(true)).is_err());
    }

    #[test]
    fn separators_sit_between_digits() {
        assert_eq!(parse_float("1_000.000_5"), Some(1000.0005));
        assert_eq!(parse_integer("0xff_ff"), Some(big(0xffff)));
        for bad in ["1_.5", "1._5", "1_e3", "1e_3", "0x_ff"] {
            assert_eq!(parse_float(bad), None, "{bad:?} should not parse");
        }
        assert!(parse_rational("1_.5").is_err());
    }

    #[test]
    fn floats_are_finite() {
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(parse_float(&huge), None);
        assert!(matches!(
            to_float(&Value::from(huge.as_str())).unwrap_err(),
            CoercionError::Malformed { .. }
        ));

        let huge_big = Value::BigInteger(BigInt::from(10).pow(400));
        assert!(matches!(
            to_float(&huge_big).unwrap_err(),
            CoercionError::Malformed { .. }
        ));
        assert!(to_complex(&huge_big).is_err());
    }

    #[test]
    fn complex_parts_are_finite() {
        for bad in ["NaN", "inf", "-inf", "1+NaNi"] {
            assert!(matches!(
                to_complex(&Value::from(bad)).unwrap_err(),
                CoercionError::Malformed { .. }
            ), "{bad:?} should not parse");
        }
        assert!(to_complex(&Value::Float(f64::NAN)).is_err());
    }

    #[test]
    fn time_to_float_keeps_fraction() {
        use chrono::{FixedOffset, TimeZone};
        let utc = FixedOffset::east_opt(0).unwrap();
        let t = Value::Time(utc.timestamp_opt(100, 500_000_000).unwrap());
        assert_eq!(to_float(&t).unwrap(), Value::Float(100.5));
        assert_eq!(to_integer(&t).unwrap(), Value::Integer(100));
    }

    #[test]
    fn non_numeric_sources_are_unsupported() {
        for v in [Value::Nil, Value::Boolean(true), Value::symbol("x")] {
            assert!(matches!(
                to_integer(&v).unwrap_err(),
                CoercionError::Unsupported { .. }
            ));
            assert!(matches!(
                to_float(&v).unwrap_err(),
                CoercionError::Unsupported { .. }
            ));
        }
    }
}
