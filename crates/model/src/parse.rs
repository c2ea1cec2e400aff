//! Defensive parsing of service responses.
//!
//! The service answers with a single object, a list, or a mapping that wraps
//! either under `basic_object` / `basic_objects`. Everything is normalized into
//! a plain `Vec` here; missing or malformed fields fall back to defaults.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::{Axis, CatalogObject, ChildSummary, Coordinates, Geometry, ObjectId, DEFAULT_NAME};

const WRAPPER_KEYS: [&str; 2] = ["basic_object", "basic_objects"];

/// Normalize any response shape into a sequence of objects.
pub fn parse_response(value: &Value) -> Vec<CatalogObject> {
    if let Value::Object(map) = value {
        for key in WRAPPER_KEYS {
            if let Some(inner) = map.get(key) {
                return objects(inner);
            }
        }
    }
    objects(value)
}

/// Parse the children endpoint: `{id, name}` summaries.
pub fn parse_summaries(value: &Value) -> Vec<ChildSummary> {
    list_under(value, "children")
        .iter()
        .filter_map(|item| {
            let id = element_id(item)?;
            let name = item
                .as_object()
                .and_then(|obj| text(obj.get("name")))
                .unwrap_or_else(|| DEFAULT_NAME.to_string());
            Some(ChildSummary { id, name })
        })
        .collect()
}

/// Parse an id list (parents endpoint). Elements may be bare ids or objects.
pub fn parse_id_list(value: &Value) -> Vec<ObjectId> {
    list_under(value, "parents")
        .iter()
        .filter_map(element_id)
        .collect()
}

impl CatalogObject {
    /// Build an object from one JSON record. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        CatalogObject {
            id: text(obj.get("id")),
            name: text(obj.get("name")).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            parents: id_list(obj.get("parents")),
            children: id_list(obj.get("children")),
            coordinates: Coordinates::from_value(obj.get("coordinates")),
            geometry: geometry(obj),
        }
    }
}

impl Coordinates {
    /// Missing components are zero.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(obj) = value.and_then(Value::as_object) else {
            return Coordinates::default();
        };
        let axis = obj.get("axis").and_then(Value::as_object);
        let axis_part = |key: &str| number(axis.and_then(|a| a.get(key)));

        Coordinates {
            x: number(obj.get("x")),
            y: number(obj.get("y")),
            z: number(obj.get("z")),
            angle: number(obj.get("angle")),
            axis: Axis {
                x: axis_part("x"),
                y: axis_part("y"),
                z: axis_part("z"),
            },
        }
    }
}

fn objects(value: &Value) -> Vec<CatalogObject> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| item.is_object())
            .map(CatalogObject::from_value)
            .collect(),
        Value::Object(map) if map.is_empty() => Vec::new(),
        Value::Object(_) => vec![CatalogObject::from_value(value)],
        _ => Vec::new(),
    }
}

fn list_under<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get(key) {
            Some(Value::Array(items)) => items,
            _ => &[],
        },
        _ => &[],
    }
}

fn geometry(obj: &Map<String, Value>) -> Option<Geometry> {
    let files = obj
        .get("bounding_contour")
        .and_then(Value::as_object)?
        .get("brep_files")
        .and_then(Value::as_object)?;

    // embedded blob wins over a path
    if let Some(blob) = text(files.get("brep_string")) {
        return Some(Geometry::Brep(blob));
    }
    text(files.get("path")).map(|path| Geometry::File(PathBuf::from(path)))
}

fn element_id(value: &Value) -> Option<ObjectId> {
    match value {
        Value::Object(obj) => text(obj.get("id")),
        other => text(Some(other)),
    }
}

fn id_list(value: Option<&Value>) -> Vec<ObjectId> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(element_id).collect(),
        _ => Vec::new(),
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
