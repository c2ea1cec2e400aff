//! Catalog object model.
//!
//! Mirrors the "basic object" resource of the part-catalog service: identity,
//! hierarchy edges, placement and an optional geometry reference. Parsing is
//! defensive (see [`parse_response`]) so partially populated records never fail.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

mod parse;
mod request;
mod tree;

pub use parse::{parse_id_list, parse_response, parse_summaries};
pub use request::{BrepFiles, PartCreationRequest};
pub use tree::{ResultTree, TreeNode};

/// Идентификатор объекта каталога (назначается сервером)
pub type ObjectId = String;

/// Подпись объекта, у которого сервер не указал имя
pub const DEFAULT_NAME: &str = "N/A";

/// Ось вращения
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Размещение объекта: позиция плюс поворот (угол вокруг оси)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub axis: Axis,
}

impl Coordinates {
    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Coordinates, eps: f64) -> bool {
        let pairs = [
            (self.x, other.x),
            (self.y, other.y),
            (self.z, other.z),
            (self.angle, other.angle),
            (self.axis.x, other.axis.x),
            (self.axis.y, other.axis.y),
            (self.axis.z, other.axis.z),
        ];
        pairs.iter().all(|(a, b)| (a - b).abs() <= eps)
    }
}

/// Геометрия объекта: встроенный BREP или путь к внешнему файлу
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// BREP, переданный строкой внутри ответа
    Brep(String),
    /// BREP, хранящийся во внешнем файле
    File(PathBuf),
}

impl Geometry {
    /// Wire representation (`brep_files`).
    pub fn brep_files(&self) -> BrepFiles {
        match self {
            Geometry::Brep(blob) => BrepFiles {
                path: None,
                brep_string: Some(blob.clone()),
            },
            Geometry::File(path) => BrepFiles {
                path: Some(path.to_string_lossy().into_owned()),
                brep_string: None,
            },
        }
    }
}

/// Объект каталога (basic object)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogObject {
    /// `None`: объект ещё ни разу не сохранялся на сервере
    pub id: Option<ObjectId>,
    pub name: String,
    pub parents: Vec<ObjectId>,
    pub children: Vec<ObjectId>,
    pub coordinates: Coordinates,
    pub geometry: Option<Geometry>,
}

impl CatalogObject {
    /// Id for display, falling back to the placeholder.
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or(DEFAULT_NAME)
    }

    pub fn brep_string(&self) -> Option<&str> {
        match &self.geometry {
            Some(Geometry::Brep(blob)) => Some(blob),
            _ => None,
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        match &self.geometry {
            Some(Geometry::File(path)) => Some(path),
            _ => None,
        }
    }

    /// Wire representation of the object, as the service returns it.
    pub fn to_value(&self) -> Value {
        let bounding_contour = match &self.geometry {
            Some(geometry) => json!({ "brep_files": geometry.brep_files() }),
            None => Value::Null,
        };
        json!({
            "id": self.id,
            "name": self.name,
            "parents": self.parents,
            "children": self.children,
            "coordinates": self.coordinates,
            "bounding_contour": bounding_contour,
        })
    }
}

/// Краткое описание дочернего объекта (ответ `/children`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSummary {
    pub id: ObjectId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_approx_eq() {
        let a = Coordinates {
            x: 1.0,
            y: 2.0,
            z: 3.0,
            angle: 45.0,
            axis: Axis { x: 0.0, y: 0.0, z: 1.0 },
        };
        let mut b = a;
        b.x += 1e-12;
        assert!(a.approx_eq(&b, 1e-9));
        b.axis.z = 0.5;
        assert!(!a.approx_eq(&b, 1e-9));
    }

    #[test]
    fn test_to_value_without_geometry() {
        let obj = CatalogObject {
            id: Some("7".into()),
            name: "frame".into(),
            ..Default::default()
        };
        let value = obj.to_value();
        assert_eq!(value["id"], "7");
        assert!(value["bounding_contour"].is_null());
        assert_eq!(value["coordinates"]["axis"]["z"], 0.0);
    }

    #[test]
    fn test_geometry_brep_files() {
        let files = Geometry::File(PathBuf::from("/tmp/part.brep")).brep_files();
        assert_eq!(files.path.as_deref(), Some("/tmp/part.brep"));
        assert!(files.brep_string.is_none());
    }
}
