//! YAML to JSON conversion with JavaScript value semantics.
//!
//! Front matter values are rendered the way a JavaScript YAML loader followed
//! by `JSON.stringify` would render them: unquoted timestamps become ISO-8601
//! UTC strings, whole floats become integers, and integer-like object keys
//! come first in ascending order.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use serde_json::{Map, Value};

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap();
    static ref TIMESTAMP_RE: Regex = Regex::new(
        r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})(?:[Tt]|[ \t]+)([0-9]{1,2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]*))?(?:[ \t]*(Z|([-+])([0-9]{1,2})(?::([0-9]{2}))?))?$"
    )
    .unwrap();
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parse a YAML document into a JSON value.
pub fn parse(raw: &str) -> Result<Value, serde_yaml::Error> {
    JsValue::new(raw).deserialize(serde_yaml::Deserializer::from_str(raw))
}

/// Seed and visitor building a [`Value`] from a document borrowed from `raw`.
///
/// Quoting is not visible through serde, so a string scalar counts as plain
/// when the slice it borrows from `raw` is not preceded by a quote.
#[derive(Clone, Copy)]
struct JsValue<'r> {
    raw: &'r str,
    resolve_timestamps: bool,
}

impl<'r> JsValue<'r> {
    fn new(raw: &'r str) -> Self {
        Self {
            raw,
            resolve_timestamps: true,
        }
    }

    fn key(self) -> Self {
        Self {
            resolve_timestamps: false,
            ..self
        }
    }

    fn is_plain(&self, scalar: &str) -> bool {
        let base = self.raw.as_ptr() as usize;
        let start = scalar.as_ptr() as usize;
        if start < base || start > base + self.raw.len() {
            return false;
        }
        !matches!(
            self.raw.as_bytes()[..start - base].last(),
            Some(b'"') | Some(b'\'')
        )
    }
}

impl<'de, 'r> DeserializeSeed<'de> for JsValue<'r> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, 'r> Visitor<'de> for JsValue<'r> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::from(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(Value::from(n))
    }

    fn visit_i128<E: de::Error>(self, n: i128) -> Result<Value, E> {
        Ok(js_number(n as f64))
    }

    fn visit_u128<E: de::Error>(self, n: u128) -> Result<Value, E> {
        Ok(js_number(n as f64))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
        Ok(js_number(n))
    }

    fn visit_borrowed_str<E: de::Error>(self, s: &'de str) -> Result<Value, E> {
        if self.resolve_timestamps && self.is_plain(s) {
            if let Some(iso) = timestamp_to_iso(s) {
                return Ok(Value::String(iso));
            }
        }
        Ok(Value::String(s.to_string()))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        DeserializeSeed::deserialize(self, deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(self)? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = Map::new();
        while let Some(key) = map.next_key_seed(self.key())? {
            let key = key_to_string(key);
            let value = map.next_value_seed(self)?;
            if object.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicated mapping key `{}`", key)));
            }
            object.insert(key, value);
        }
        Ok(Value::Object(js_key_order(object)))
    }

    // Custom tags arrive as enums; the tag is dropped and the value kept.
    fn visit_enum<A>(self, data: A) -> Result<Value, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (_tag, variant): (String, A::Variant) = data.variant()?;
        variant.newtype_variant_seed(self)
    }
}

fn js_number(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Value::from(n as i64);
    }
    // NaN and infinities have no JSON form
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn key_to_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn array_index(key: &str) -> Option<u32> {
    if key != "0" && (key.starts_with('0') || !key.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&i| i != u32::MAX)
}

/// Reorder keys the way JavaScript enumerates object properties.
pub fn js_key_order(object: Map<String, Value>) -> Map<String, Value> {
    if !object.keys().any(|k| array_index(k).is_some()) {
        return object;
    }

    let mut indexed = Vec::new();
    let mut named = Vec::new();
    for (key, value) in object {
        match array_index(&key) {
            Some(i) => indexed.push((i, key, value)),
            None => named.push((key, value)),
        }
    }
    indexed.sort_by_key(|(i, _, _)| *i);

    indexed
        .into_iter()
        .map(|(_, k, v)| (k, v))
        .chain(named)
        .collect()
}

fn field(caps: &Captures<'_>, i: usize) -> i64 {
    caps.get(i)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

// Date.UTC semantics: months and days roll over, years 0-99 mean 1900-1999.
fn utc_midnight(year: i64, month: i64, day: i64) -> Option<NaiveDateTime> {
    let year = if (0..=99).contains(&year) { year + 1900 } else { year };
    let month0 = month - 1;
    let year = year + month0.div_euclid(12);
    let month = month0.rem_euclid(12) + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month as u32, 1)?;
    first
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(day - 1))
}

/// Render a plain YAML timestamp as `Date.prototype.toISOString` would.
pub fn timestamp_to_iso(s: &str) -> Option<String> {
    let instant = if let Some(caps) = DATE_RE.captures(s) {
        utc_midnight(field(&caps, 1), field(&caps, 2), field(&caps, 3))?
    } else {
        let caps = TIMESTAMP_RE.captures(s)?;
        let millis = caps
            .get(7)
            .map(|m| {
                let digits: String = m.as_str().chars().chain(std::iter::repeat('0')).take(3).collect();
                digits.parse::<i64>().unwrap_or(0)
            })
            .unwrap_or(0);

        let mut offset_ms = ((field(&caps, 4) * 60 + field(&caps, 5)) * 60 + field(&caps, 6)) * 1000 + millis;
        if let Some(sign) = caps.get(9) {
            let delta = (field(&caps, 10) * 60 + field(&caps, 11)) * 60_000;
            offset_ms -= if sign.as_str() == "-" { -delta } else { delta };
        }

        utc_midnight(field(&caps, 1), field(&caps, 2), field(&caps, 3))?
            .checked_add_signed(Duration::milliseconds(offset_ms))?
    };

    Some(instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}
