//! CAD host seam.
//!
//! The orchestrator only talks to the host application through [`CadHost`].
//! Implementations wrap the real application API; [`MemoryHost`](crate::MemoryHost)
//! is the in-process reference implementation.

use std::path::Path;

use plm_model::{Axis, Coordinates};

use crate::error::Result;

/// Host document identifier (the document's internal name)
pub type DocumentId = String;

/// Position plus angle/axis rotation of a native object
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub position: [f64; 3],
    pub angle: f64,
    pub axis: [f64; 3],
}

impl From<&Coordinates> for Placement {
    fn from(c: &Coordinates) -> Self {
        Self {
            position: [c.x, c.y, c.z],
            angle: c.angle,
            axis: [c.axis.x, c.axis.y, c.axis.z],
        }
    }
}

impl From<Placement> for Coordinates {
    fn from(p: Placement) -> Self {
        Coordinates {
            x: p.position[0],
            y: p.position[1],
            z: p.position[2],
            angle: p.angle,
            axis: Axis {
                x: p.axis[0],
                y: p.axis[1],
                z: p.axis[2],
            },
        }
    }
}

/// Handle to an object inside a host document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub document: DocumentId,
    pub name: String,
}

impl ObjectRef {
    pub fn new(document: impl Into<DocumentId>, name: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            name: name.into(),
        }
    }
}

/// Data read back from a native object
#[derive(Debug, Clone, PartialEq)]
pub struct NativeObject {
    pub label: String,
    pub placement: Placement,
    /// Catalog id stamped on the object, if any
    pub tag: Option<String>,
}

/// Capabilities the orchestrator needs from the host CAD application.
///
/// Every call is synchronous and may fail on the host side.
pub trait CadHost {
    /// Open a file as a new document and make it active.
    fn open_file(&mut self, path: &Path) -> Result<DocumentId>;

    /// Currently active document, [`PlmError::NoActiveDocument`](crate::PlmError::NoActiveDocument) if none.
    fn active_document(&self) -> Result<DocumentId>;

    /// Close the active document. No-op when nothing is open.
    fn close_active_document(&mut self) -> Result<()>;

    /// Create and activate a document. The host may adjust the name to keep it unique.
    fn new_document(&mut self, name: &str) -> Result<DocumentId>;

    fn document_tag(&self, doc: &str) -> Result<Option<String>>;

    fn set_document_tag(&mut self, doc: &str, id: &str) -> Result<()>;

    /// Build a shape from a BREP string and place it.
    fn materialize_shape(&mut self, doc: &str, label: &str, brep: &str, placement: &Placement) -> Result<ObjectRef>;

    /// Import shape geometry from a file into an existing document.
    fn import_file(&mut self, doc: &str, path: &Path, placement: &Placement) -> Result<ObjectRef>;

    /// Selected objects, in selection order.
    fn selection(&self) -> Result<Vec<ObjectRef>>;

    fn read_object(&self, obj: &ObjectRef) -> Result<NativeObject>;

    /// Export the object's shape as a BREP string.
    fn export_geometry(&self, obj: &ObjectRef) -> Result<String>;

    fn set_object_tag(&mut self, obj: &ObjectRef, id: &str) -> Result<()>;
}
