/*

    Provide utilities to parse the billboard definitions file.

    The parser is lenient about how numbers are written:
    scalars may be JSON numbers or numeric strings, and
    corners may be given as {x, y, z} objects, [x, y, z]
    arrays or "x y z" strings.

    It is strict about the world position anchor which
    must read exactly X:<num>Y:<num>Z:<num>.

    @date: Oct, 2026
*/

use std::fmt::{self};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde::de::{self, Visitor, SeqAccess, MapAccess};

use crate::prelude::*;
use crate::errors::{BillboardError, Result, Stage};
use crate::json_structs::{Billboards};

pub fn parse_definitions(path: &Path) -> Result<Billboards> {

    let span = tracing::span!(tracing::Level::INFO, "load_definitions");
    let _enter = span.enter();

    // Open file
    let file = File::open(path).map_err(|e| BillboardError::Input {
        path: path.to_path_buf(),
        reason: format!("{} failed: {e}", Stage::ReadDefinitions),
    })?;
    let reader = BufReader::new(file);
    debug!("Reading definitions from {}", path.display());

    let billboards: Billboards = serde_json::from_reader(reader).map_err(|e| BillboardError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!("Found {} billboard definitions", billboards.len());
    Ok(billboards)
}

/// Parse an anchor like "X:100Y:-2.5Z:3e2" into a Vector3.
pub fn parse_world_position(name: &str, raw: &str) -> Result<Vector3> {
    let fail = |reason: String| BillboardError::AnchorParse {
        name: name.to_string(),
        raw: raw.to_string(),
        reason,
    };

    let mut rest = raw;
    let mut coords = [0.0 as Float; 3];
    for (i, marker) in ["X:", "Y:", "Z:"].iter().enumerate() {
        rest = rest
            .strip_prefix(marker)
            .ok_or_else(|| fail(format!("expected '{marker}' at '{rest}'")))?;
        let (number, tail) = split_number(rest);
        coords[i] = parse_strict_float(number).map_err(|e| fail(format!("after '{marker}': {e}")))?;
        rest = tail;
    }
    if !rest.is_empty() {
        return Err(fail(format!("unexpected trailing characters '{rest}'")));
    }
    Ok(Vector3::new(coords[0], coords[1], coords[2]))
}

// Longest prefix made only of characters that can appear in a decimal number
fn split_number(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Accepts [+-]digits[.digits][(e|E)[+-]digits] and nothing else,
/// so "inf", "NaN" or empty strings never slip through.
fn parse_strict_float(s: &str) -> std::result::Result<Float, String> {
    if s.is_empty() {
        return Err("missing number".to_string());
    }
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() { i += 1; }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() { i += 1; }
        digits += i - frac_start;
    }
    if digits == 0 {
        return Err(format!("'{s}' is not a number"));
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') { i += 1; }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() { i += 1; }
        if i == exp_start {
            return Err(format!("'{s}' has an empty exponent"));
        }
    }
    if i != bytes.len() {
        return Err(format!("'{s}' is not a number"));
    }
    let value = s.parse::<Float>().map_err(|e| e.to_string())?;
    if !value.is_finite() {
        return Err(format!("'{s}' is out of range"));
    }
    Ok(value)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(Float),
    Text(String),
}

impl NumberOrString {
    fn into_float<E: de::Error>(self) -> std::result::Result<Float, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s.trim().parse::<Float>()
                .map_err(|_| E::custom(format!("Failed to parse float from '{s}'"))),
        }
    }
}

// Handles floats as string or number
pub fn deser_float<'de, D>(deserializer: D) -> std::result::Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_float()
}

pub fn deser_corner<'de, D>(deserializer: D) -> std::result::Result<Vector3, D::Error>
where
    D: Deserializer<'de>,
{
    struct CornerVisitor;

    impl<'de> Visitor<'de> for CornerVisitor {
        type Value = Vector3;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a corner as {x, y, z}, [x, y, z] or 'x y z'")
        }

        // Given "X Y Z"
        fn visit_str<E>(self, value: &str) -> std::result::Result<Vector3, E>
        where
            E: de::Error,
        {
            parse_vec3_str(value).map_err(de::Error::custom)
        }

        // Given [X, Y, Z]
        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Vector3, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut next = || -> std::result::Result<Float, A::Error> {
                seq.next_element::<NumberOrString>()?
                    .ok_or_else(|| de::Error::custom("Expected 3 elements in corner array"))?
                    .into_float()
            };
            let (x, y, z) = (next()?, next()?, next()?);
            if seq.next_element::<de::IgnoredAny>()?.is_some() {
                return Err(de::Error::custom("Expected only 3 elements in corner array"));
            }
            Ok(Vector3::new(x, y, z))
        }

        // Given {"x": X, "y": Y, "z": Z}
        fn visit_map<M>(self, mut map: M) -> std::result::Result<Vector3, M::Error>
        where
            M: MapAccess<'de>,
        {
            let (mut x, mut y, mut z) = (None, None, None);
            while let Some(key) = map.next_key::<String>()? {
                let slot = match key.as_str() {
                    "x" | "X" => &mut x,
                    "y" | "Y" => &mut y,
                    "z" | "Z" => &mut z,
                    other => {
                        warn!("Ignoring unknown corner component '{other}'");
                        map.next_value::<de::IgnoredAny>()?;
                        continue;
                    }
                };
                if slot.is_some() {
                    return Err(de::Error::custom(format!("duplicate corner component '{key}'")));
                }
                *slot = Some(map.next_value::<NumberOrString>()?.into_float()?);
            }
            let x = x.ok_or_else(|| de::Error::missing_field("x"))?;
            let y = y.ok_or_else(|| de::Error::missing_field("y"))?;
            let z = z.ok_or_else(|| de::Error::missing_field("z"))?;
            Ok(Vector3::new(x, y, z))
        }
    }

    deserializer.deserialize_any(CornerVisitor)
}

/// Helper function: parse a string like "25 25 25" into Vector3
fn parse_vec3_str(s: &str) -> std::result::Result<Vector3, String> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!("Expected 3 values, got {}", parts.len()));
    }
    let x = parts[0].parse::<Float>().map_err(|e| e.to_string())?;
    let y = parts[1].parse::<Float>().map_err(|e| e.to_string())?;
    let z = parts[2].parse::<Float>().map_err(|e| e.to_string())?;
    Ok(Vector3::new(x, y, z))
}
