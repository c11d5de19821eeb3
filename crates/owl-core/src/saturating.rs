use std::fmt;
use std::num::IntErrorKind;

use serde::Deserializer;
use serde::de::{self, Visitor};

/// Parse a whole number, saturating at the `i64` bounds instead of failing
/// on overflow. Returns `None` only for text that is not a number at all.
pub fn parse_whole(text: &str) -> Option<i64> {
    match text.trim().parse::<i64>() {
        Ok(v) => Some(v),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Clamp into `0..=u8::MAX`.
pub fn to_u8(value: i64) -> u8 {
    u8::try_from(value.clamp(0, i64::from(u8::MAX))).unwrap_or(u8::MAX)
}

/// Clamp into `0..=u32::MAX`.
pub fn to_u32(value: i64) -> u32 {
    u32::try_from(value.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX)
}

/// Clamp into the `i32` range.
pub fn to_i32(value: i64) -> i32 {
    i32::try_from(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX))).unwrap_or_default()
}

struct WholeNumber;

impl Visitor<'_> for WholeNumber {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        Ok(i64::try_from(v).unwrap_or(i64::MAX))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        // float-to-int casts saturate and map NaN to zero
        Ok(v as i64)
    }
}

/// `deserialize_with` helper: any number, clamped into `u8`.
pub fn deserialize_u8<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    d.deserialize_any(WholeNumber).map(to_u8)
}

/// `deserialize_with` helper: any number, clamped into `u32`.
pub fn deserialize_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    d.deserialize_any(WholeNumber).map(to_u32)
}

/// `deserialize_with` helper: any number, clamped into `i32`.
pub fn deserialize_i32<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    d.deserialize_any(WholeNumber).map(to_i32)
}
