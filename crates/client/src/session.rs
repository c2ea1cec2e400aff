//! Upsert and hierarchy navigation.
//!
//! `Session` ties the catalog API, the CAD host and the navigation history
//! together. Every method is one user action; all failures come back as
//! [`PlmError`] and are rendered by the caller.

use plm_model::{CatalogObject, ChildSummary, Geometry, ObjectId, ResultTree, DEFAULT_NAME, parse_response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::CatalogApi;
use crate::error::{PlmError, Result};
use crate::history::NavigationHistory;
use crate::host::{CadHost, DocumentId, ObjectRef, Placement};
use crate::settings::Settings;
use crate::transport::Transport;
use crate::upload::build_request;

/// Where loaded geometry goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Close the active document and open a fresh one named after the object
    #[default]
    NewDocument,
    /// Add the geometry to the active document
    SameDocument,
}

/// Hierarchy direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards the supersystem (parents)
    Up,
    /// Towards subsystems (children)
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub id: ObjectId,
    pub name: String,
    pub document: DocumentId,
    /// Materialized object. `None` when the record has no geometry, or when
    /// its file was opened as a whole document.
    pub object: Option<ObjectRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub id: ObjectId,
    pub action: UploadAction,
    /// Set when the remote write succeeded but stamping the id locally failed
    pub warning: Option<String>,
}

/// Result of a supersystem/subsystem step
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Loaded(LoadOutcome),
    /// Nothing in that direction
    Empty(Direction),
    /// Several candidates; the caller loads the user's pick with [`Session::load`]
    Choose {
        direction: Direction,
        candidates: Vec<ChildSummary>,
    },
}

/// Search or list result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    pub objects: Vec<CatalogObject>,
    pub tree: ResultTree,
}

impl SearchResult {
    fn new(objects: Vec<CatalogObject>) -> Self {
        let tree = ResultTree::build(&objects);
        Self { objects, tree }
    }
}

pub struct Session<T, H> {
    api: CatalogApi<T>,
    host: H,
    history: NavigationHistory,
    author: String,
}

impl<T: Transport, H: CadHost> Session<T, H> {
    pub fn new(transport: T, host: H, settings: &Settings) -> Self {
        Self {
            api: CatalogApi::new(transport),
            host,
            history: NavigationHistory::new(settings.history_capacity),
            author: settings.author.clone(),
        }
    }

    pub fn api(&self) -> &CatalogApi<T> {
        &self.api
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Search by name. An empty term is rejected before any request.
    pub fn search(&self, name: &str) -> Result<SearchResult> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlmError::EmptySearch);
        }
        tracing::info!("Searching catalog for `{name}`");
        Ok(SearchResult::new(self.api.search(name)?))
    }

    pub fn find_all(&self) -> Result<SearchResult> {
        tracing::info!("Listing all catalog objects");
        Ok(SearchResult::new(self.api.list_all()?))
    }

    /// Fetch `id` and materialize it according to `mode`.
    pub fn load(&mut self, id: &str, mode: LoadMode) -> Result<LoadOutcome> {
        let record = self.api.get(id)?;
        let id = record.id.clone().unwrap_or_else(|| id.to_string());
        let placement = Placement::from(&record.coordinates);
        tracing::info!("Loading `{}` ({id}) into {mode:?}", record.name);

        let (document, object) = match mode {
            LoadMode::NewDocument => {
                self.host.close_active_document()?;
                let (document, object) = match &record.geometry {
                    Some(Geometry::File(path)) => (self.host.open_file(path)?, None),
                    Some(Geometry::Brep(blob)) => {
                        let document = self.host.new_document(&id)?;
                        let object = self.host.materialize_shape(&document, &record.name, blob, &placement)?;
                        (document, Some(object))
                    }
                    None => (self.host.new_document(&id)?, None),
                };
                self.host.set_document_tag(&document, &id)?;
                (document, object)
            }
            LoadMode::SameDocument => {
                let document = self.host.active_document()?;
                let object = match &record.geometry {
                    Some(Geometry::File(path)) => Some(self.host.import_file(&document, path, &placement)?),
                    Some(Geometry::Brep(blob)) => {
                        Some(self.host.materialize_shape(&document, &record.name, blob, &placement)?)
                    }
                    None => None,
                };
                (document, object)
            }
        };

        if let Some(object) = &object {
            self.host.set_object_tag(object, &id)?;
        }
        if record.geometry.is_none() {
            tracing::info!("Object {id} has no geometry yet");
        }

        self.history.push(&id);
        Ok(LoadOutcome {
            id,
            name: record.name,
            document,
            object,
        })
    }

    /// Push the first selected object to the catalog (create or update).
    pub fn upload(&mut self) -> Result<UploadOutcome> {
        let target = self
            .host
            .selection()?
            .into_iter()
            .next()
            .ok_or(PlmError::NoSelection)?;
        let request = build_request(&self.host, &target, &self.author)?;

        let (response, action) = match request.id.as_deref() {
            Some(id) => match self.api.get(id) {
                Ok(_) => (self.api.update(id, &request)?, UploadAction::Updated),
                Err(e) => {
                    // any failed existence check counts as "not found"
                    tracing::warn!("Existence check for {id} failed ({e}); creating a new object");
                    (self.api.create(&request)?, UploadAction::Created)
                }
            },
            None => (self.api.create(&request)?, UploadAction::Created),
        };

        let id = match (response_id(&response), action) {
            (Some(id), _) => id,
            (None, UploadAction::Updated) => request.id.clone().ok_or(PlmError::MissingField("id"))?,
            (None, UploadAction::Created) => return Err(PlmError::MissingField("id")),
        };
        tracing::info!("Uploaded `{}` as {id} ({action:?})", request.name);

        // the remote write is done; a local stamping failure does not undo it
        let warning = self.stamp_uploaded(&target, &id).err().map(|e| {
            tracing::warn!("Uploaded {id} but could not stamp it locally: {e}");
            format!("Saved as {id}, but the id could not be stored locally: {e}")
        });

        Ok(UploadOutcome { id, action, warning })
    }

    /// Tag the object, and its document unless the document already belongs
    /// to another catalog record.
    fn stamp_uploaded(&mut self, target: &ObjectRef, id: &str) -> Result<()> {
        self.host.set_object_tag(target, id)?;
        if self.host.document_tag(&target.document)?.is_none() {
            self.host.set_document_tag(&target.document, id)?;
        }
        Ok(())
    }

    /// Catalog id of the object the user is working on.
    pub fn current_object_id(&self) -> Result<ObjectId> {
        if let Some(first) = self.host.selection()?.first() {
            if let Some(tag) = self.host.read_object(first)?.tag {
                return Ok(tag);
            }
        }
        let document = match self.host.active_document() {
            Ok(document) => document,
            Err(PlmError::NoActiveDocument) => return Err(PlmError::NoCurrentObject),
            Err(e) => return Err(e),
        };
        self.host.document_tag(&document)?.ok_or(PlmError::NoCurrentObject)
    }

    /// Go to a subsystem of the current object.
    pub fn descend(&mut self, mode: LoadMode) -> Result<Navigation> {
        let id = self.current_object_id()?;
        // always ask the server: locally known children may be stale
        let mut children = self.api.children(&id)?;
        match children.len() {
            0 => Ok(Navigation::Empty(Direction::Down)),
            1 => {
                let child = children.remove(0);
                Ok(Navigation::Loaded(self.load(&child.id, mode)?))
            }
            _ => Ok(Navigation::Choose {
                direction: Direction::Down,
                candidates: children,
            }),
        }
    }

    /// Go to the supersystem of the current object.
    ///
    /// A parent opened earlier in this session wins. Without such a parent a
    /// single parent is loaded directly and several are offered for choice.
    pub fn ascend(&mut self, mode: LoadMode) -> Result<Navigation> {
        let id = self.current_object_id()?;
        let parents = self.api.parents(&id)?;
        if parents.is_empty() {
            return Ok(Navigation::Empty(Direction::Up));
        }

        if let Some(visited) = self.history.first_visited(&parents).cloned() {
            return Ok(Navigation::Loaded(self.load(&visited, mode)?));
        }
        if let [only] = parents.as_slice() {
            let only = only.clone();
            return Ok(Navigation::Loaded(self.load(&only, mode)?));
        }

        let candidates = parents
            .into_iter()
            .map(|pid| {
                let name = match self.api.get(&pid) {
                    Ok(record) => record.name,
                    Err(e) => {
                        tracing::warn!("Could not fetch name of parent {pid}: {e}");
                        DEFAULT_NAME.to_string()
                    }
                };
                ChildSummary { id: pid, name }
            })
            .collect();
        Ok(Navigation::Choose {
            direction: Direction::Up,
            candidates,
        })
    }
}

fn response_id(response: &Value) -> Option<ObjectId> {
    parse_response(response).into_iter().next().and_then(|obj| obj.id)
}
