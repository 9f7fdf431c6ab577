//! Lenient deserializers for the upstream JSON.
//!
//! The upstream API is not versioned and mixes representations freely: a
//! price may arrive as `1500`, `"1500"`, `"1,500"`, `null`, or be missing
//! altogether. Every numeric field in the response models goes through
//! these helpers so that any of those shapes decodes to a plain integer,
//! with zero as the universal default.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Flexible {
    Int(i64),
    Float(f64),
    Text(String),
}

fn to_u64(raw: Option<Flexible>) -> u64 {
    match raw {
        Some(Flexible::Int(n)) => n.max(0) as u64,
        Some(Flexible::Float(f)) if f.is_finite() && f > 0.0 => f as u64,
        Some(Flexible::Float(_)) => 0,
        Some(Flexible::Text(s)) => s.trim().replace(',', "").parse().unwrap_or(0),
        None => 0,
    }
}

/// Number, numeric string, or null → `u64`, defaulting to 0.
pub(crate) fn flex_u64<'de, D>(de: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(to_u64(Option::<Flexible>::deserialize(de)?))
}

/// Number, numeric string, or null → `u32`, defaulting to 0.
pub(crate) fn flex_u32<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(to_u64(Option::<Flexible>::deserialize(de)?).min(u64::from(u32::MAX)) as u32)
}

/// String or null → `String`, defaulting to empty.
pub(crate) fn flex_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Text(String),
        Int(i64),
        Float(f64),
    }
    Ok(match Option::<Text>::deserialize(de)? {
        Some(Text::Text(s)) => s,
        Some(Text::Int(n)) => n.to_string(),
        Some(Text::Float(f)) => f.to_string(),
        None => String::new(),
    })
}
