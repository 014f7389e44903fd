//! Ordered candidate-key lookup over loosely structured JSON objects.
//!
//! Providers name the same attribute differently (`team_id` vs `teamId` vs
//! `tid`). Each logical attribute owns an ordered key list; the first key that
//! is present and not `null` wins. `0`, `false` and `""` are real values.

use serde_json::{Map, Value};

pub type Keys = &'static [&'static str];

/// Document-level keys that may hold the frame sequence.
pub const FRAME_SEQUENCE_KEYS: Keys = &["frames", "data", "positions", "samples"];
pub const PERIOD_KEYS: Keys = &["period", "half"];
pub const FRAME_INDEX_KEYS: Keys = &["frame", "frame_id"];
pub const TIME_KEYS: Keys = &["timestamp", "time", "t", "ts"];
/// Frame-level keys that may hold the entity list.
pub const ENTITY_LIST_KEYS: Keys = &["data", "entities", "players", "objects"];
pub const ENTITY_ID_KEYS: Keys = &["id", "entity_id", "player_id", "track_id"];
pub const TEAM_ID_KEYS: Keys = &["team_id", "team", "teamId", "tid"];
pub const SPEED_KEYS: Keys = &["speed", "v"];
pub const FRAME_RATE_KEYS: Keys = &["frame_rate", "fps"];
/// Sub-objects that may carry `x`/`y` when they are not on the entity itself.
pub const COORDINATE_PARENTS: Keys = &["position", "coordinates"];

/// First candidate key holding a non-null value, with the key that matched.
pub fn first_present_entry<'a>(
    obj: &'a Map<String, Value>,
    keys: Keys,
) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|&key| obj.get(key).filter(|v| !v.is_null()).map(|v| (key, v)))
}

/// First candidate key holding a non-null value.
pub fn first_present<'a>(obj: &'a Map<String, Value>, keys: Keys) -> Option<&'a Value> {
    first_present_entry(obj, keys).map(|(_, v)| v)
}

/// Coordinate axis (`"x"` or `"y"`) on the entity, else one level down under
/// `position`, else under `coordinates`.
pub fn coordinate<'a>(obj: &'a Map<String, Value>, axis: &str) -> Option<&'a Value> {
    if let Some(v) = obj.get(axis).filter(|v| !v.is_null()) {
        return Some(v);
    }
    COORDINATE_PARENTS.iter().find_map(|&parent| {
        obj.get(parent)
            .and_then(Value::as_object)
            .and_then(|nested| nested.get(axis))
            .filter(|v| !v.is_null())
    })
}

/// Numeric coercion: JSON numbers and numeric strings. Non-finite is missing.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Integer coercion for period indicators. Floats truncate toward zero.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Frame index coercion: integers, or floats/strings with an integral value.
pub fn as_frame_index(value: &Value) -> Option<i64> {
    let integral = |f: f64| {
        (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
    };
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

/// Identifier coercion: strings verbatim, numbers in canonical text form.
pub fn as_identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
