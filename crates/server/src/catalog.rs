//! In-memory catalog store

use plm_model::{parse_response, CatalogObject, ChildSummary, ObjectId, PartCreationRequest, DEFAULT_NAME};
use serde_json::{json, Value};

/// Descriptive fields that are stored but not part of the object model
#[derive(Debug, Clone, Default)]
struct Meta {
    is_assembly: bool,
    author: String,
    description: String,
    role: String,
    role_description: String,
}

impl From<&PartCreationRequest> for Meta {
    fn from(req: &PartCreationRequest) -> Self {
        Self {
            is_assembly: req.is_assembly,
            author: req.author.clone(),
            description: req.description.clone(),
            role: req.role.clone(),
            role_description: req.role_description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    object: CatalogObject,
    meta: Meta,
}

impl Entry {
    fn id(&self) -> &str {
        self.object.id.as_deref().unwrap_or_default()
    }

    fn to_value(&self) -> Value {
        let mut value = self.object.to_value();
        if let Value::Object(map) = &mut value {
            map.insert("is_assembly".into(), json!(self.meta.is_assembly));
            map.insert("author".into(), json!(self.meta.author));
            map.insert("description".into(), json!(self.meta.description));
            map.insert("role".into(), json!(self.meta.role));
            map.insert("role_description".into(), json!(self.meta.role_description));
        }
        value
    }
}

/// Objects in insertion order
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from object representations (any shape `parse_response` accepts).
    /// Records without an id get a fresh one.
    pub fn from_seed(seed: &Value) -> Self {
        let entries = parse_response(seed)
            .into_iter()
            .map(|mut object| {
                if object.id.is_none() {
                    object.id = Some(new_id());
                }
                Entry {
                    object,
                    meta: Meta::default(),
                }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> Vec<Value> {
        self.entries.iter().map(Entry::to_value).collect()
    }

    /// Case-insensitive substring match on the name.
    pub fn search(&self, name: &str) -> Vec<Value> {
        let needle = name.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.object.name.to_lowercase().contains(&needle))
            .map(Entry::to_value)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Value> {
        self.entry(id).map(Entry::to_value)
    }

    /// Child summaries; ids without a stored object keep the placeholder name.
    pub fn children(&self, id: &str) -> Option<Vec<ChildSummary>> {
        let entry = self.entry(id)?;
        Some(
            entry
                .object
                .children
                .iter()
                .map(|cid| ChildSummary {
                    id: cid.clone(),
                    name: self
                        .entry(cid)
                        .map(|c| c.object.name.clone())
                        .unwrap_or_else(|| DEFAULT_NAME.to_string()),
                })
                .collect(),
        )
    }

    pub fn parents(&self, id: &str) -> Option<Vec<ObjectId>> {
        self.entry(id).map(|e| e.object.parents.clone())
    }

    pub fn create(&mut self, req: &PartCreationRequest) -> Value {
        let id = new_id();
        let object = CatalogObject {
            id: Some(id.clone()),
            name: if req.name.is_empty() { DEFAULT_NAME.to_string() } else { req.name.clone() },
            parents: Vec::new(),
            children: Vec::new(),
            coordinates: req.coordinates,
            geometry: req.geometry(),
        };
        self.entries.push(Entry {
            object,
            meta: Meta::from(req),
        });
        if !req.parents.is_empty() {
            self.link(&id, &req.parents);
        }
        tracing::info!("Created object {id}");
        self.get(&id).unwrap_or(Value::Null)
    }

    pub fn update(&mut self, id: &str, req: &PartCreationRequest) -> Option<Value> {
        let entry = self.entries.iter_mut().find(|e| e.id() == id)?;
        if !req.name.is_empty() {
            entry.object.name = req.name.clone();
        }
        entry.object.coordinates = req.coordinates;
        if let Some(geometry) = req.geometry() {
            entry.object.geometry = Some(geometry);
        }
        entry.meta = Meta::from(req);
        if !req.parents.is_empty() {
            self.link(id, &req.parents);
        }
        tracing::info!("Updated object {id}");
        self.get(id)
    }

    /// Make `parents` the parent set of `child`, keeping children lists in sync.
    fn link(&mut self, child: &str, parents: &[ObjectId]) {
        for entry in &mut self.entries {
            let is_parent = parents.iter().any(|p| p == entry.id());
            let has_child = entry.object.children.iter().any(|c| c == child);
            if is_parent && !has_child {
                entry.object.children.push(child.to_string());
            } else if !is_parent && has_child {
                entry.object.children.retain(|c| c != child);
            }
            if entry.id() == child {
                entry.object.parents = parents.to_vec();
            }
        }
    }

    fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id() == id)
    }
}

fn new_id() -> ObjectId {
    uuid::Uuid::new_v4().to_string()
}
