use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Coordinates, Geometry, ObjectId};

/// `brep_files` block: either a path or an embedded BREP string
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrepFiles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brep_string: Option<String>,
}

/// Upload payload built from a native CAD object right before a create/update.
///
/// Transient: it is never stored, only serialized with [`to_payload`](Self::to_payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartCreationRequest {
    /// Previously confirmed id. Not part of the create body, only used to
    /// pick between create and update.
    #[serde(default, skip_serializing)]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub is_assembly: bool,
    #[serde(default)]
    pub brep_files: BrepFiles,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub role_description: String,
    /// Hierarchy edges to link on the server. The client leaves this empty;
    /// the server owns the hierarchy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<ObjectId>,
}

impl PartCreationRequest {
    pub fn new(name: impl Into<String>, brep_string: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: None,
            is_assembly: false,
            brep_files: BrepFiles {
                path: None,
                brep_string: Some(brep_string.into()),
            },
            name: name.into(),
            author: String::new(),
            description: String::new(),
            coordinates,
            role: String::new(),
            role_description: String::new(),
            parents: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: Option<ObjectId>) -> Self {
        self.id = id;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Geometry carried by the payload, embedded blob first.
    pub fn geometry(&self) -> Option<Geometry> {
        if let Some(blob) = self.brep_files.brep_string.as_ref().filter(|b| !b.is_empty()) {
            return Some(Geometry::Brep(blob.clone()));
        }
        self.brep_files
            .path
            .as_ref()
            .filter(|p| !p.is_empty())
            .map(|p| Geometry::File(p.into()))
    }

    /// JSON body sent to the service.
    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
