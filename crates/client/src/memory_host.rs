//! In-memory CAD host.
//!
//! Keeps documents, shapes (as BREP text), selection and catalog tags in
//! memory. Used by the standalone panel and by tests.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{PlmError, Result};
use crate::host::{CadHost, DocumentId, NativeObject, ObjectRef, Placement};

const BREP_MARKER: &str = "CASCADE Topology";

#[derive(Debug, Clone)]
struct Shape {
    name: String,
    label: String,
    brep: String,
    placement: Placement,
    tag: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct Document {
    tag: Option<String>,
    shapes: Vec<Shape>,
}

/// Reference [`CadHost`] keeping everything in memory
#[derive(Debug, Default)]
pub struct MemoryHost {
    documents: BTreeMap<DocumentId, Document>,
    active: Option<DocumentId>,
    selection: Vec<ObjectRef>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document names, sorted.
    pub fn document_names(&self) -> Vec<DocumentId> {
        self.documents.keys().cloned().collect()
    }

    /// Objects of a document in creation order.
    pub fn objects(&self, doc: &str) -> Result<Vec<ObjectRef>> {
        let document = self.document(doc)?;
        Ok(document
            .shapes
            .iter()
            .map(|s| ObjectRef::new(doc, s.name.clone()))
            .collect())
    }

    /// Make `doc` the active document.
    pub fn activate(&mut self, doc: &str) -> Result<()> {
        self.document(doc)?;
        self.active = Some(doc.to_string());
        Ok(())
    }

    /// Replace the selection with a single object.
    pub fn select(&mut self, obj: &ObjectRef) -> Result<()> {
        self.shape(obj)?;
        self.selection = vec![obj.clone()];
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Insert a shape without validating its BREP text.
    pub fn add_object(&mut self, doc: &str, label: &str, brep: &str, placement: Placement) -> Result<ObjectRef> {
        let document = self.document_mut(doc)?;
        let name = unique_name("Shape", document.shapes.iter().map(|s| s.name.as_str()));
        document.shapes.push(Shape {
            name: name.clone(),
            label: label.to_string(),
            brep: brep.to_string(),
            placement,
            tag: None,
        });
        Ok(ObjectRef::new(doc, name))
    }

    fn document(&self, doc: &str) -> Result<&Document> {
        self.documents
            .get(doc)
            .ok_or_else(|| PlmError::host(format!("No document named `{doc}`")))
    }

    fn document_mut(&mut self, doc: &str) -> Result<&mut Document> {
        self.documents
            .get_mut(doc)
            .ok_or_else(|| PlmError::host(format!("No document named `{doc}`")))
    }

    fn shape(&self, obj: &ObjectRef) -> Result<&Shape> {
        self.document(&obj.document)?
            .shapes
            .iter()
            .find(|s| s.name == obj.name)
            .ok_or_else(|| PlmError::host(format!("No object `{}` in `{}`", obj.name, obj.document)))
    }

    fn shape_mut(&mut self, obj: &ObjectRef) -> Result<&mut Shape> {
        let name = obj.name.clone();
        let doc = obj.document.clone();
        self.document_mut(&obj.document)?
            .shapes
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| PlmError::host(format!("No object `{name}` in `{doc}`")))
    }

    fn read_brep(path: &Path) -> Result<String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PlmError::host(format!("Failed to open file {}: {e}", path.display())))?;
        check_brep(&text)?;
        Ok(text)
    }
}

impl CadHost for MemoryHost {
    fn open_file(&mut self, path: &Path) -> Result<DocumentId> {
        let brep = Self::read_brep(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Unnamed".to_string());
        let doc = self.new_document(&stem)?;
        self.add_object(&doc, &stem, &brep, Placement::default())?;
        tracing::debug!("Opened {} as document {doc}", path.display());
        Ok(doc)
    }

    fn active_document(&self) -> Result<DocumentId> {
        self.active.clone().ok_or(PlmError::NoActiveDocument)
    }

    fn close_active_document(&mut self) -> Result<()> {
        if let Some(doc) = self.active.take() {
            self.documents.remove(&doc);
            self.selection.retain(|o| o.document != doc);
        }
        Ok(())
    }

    fn new_document(&mut self, name: &str) -> Result<DocumentId> {
        let base = if name.trim().is_empty() { "Unnamed" } else { name };
        let doc = unique_name(base, self.documents.keys().map(String::as_str));
        self.documents.insert(doc.clone(), Document::default());
        self.active = Some(doc.clone());
        Ok(doc)
    }

    fn document_tag(&self, doc: &str) -> Result<Option<String>> {
        Ok(self.document(doc)?.tag.clone())
    }

    fn set_document_tag(&mut self, doc: &str, id: &str) -> Result<()> {
        self.document_mut(doc)?.tag = Some(id.to_string());
        Ok(())
    }

    fn materialize_shape(&mut self, doc: &str, label: &str, brep: &str, placement: &Placement) -> Result<ObjectRef> {
        check_brep(brep)?;
        self.add_object(doc, label, brep, *placement)
    }

    fn import_file(&mut self, doc: &str, path: &Path, placement: &Placement) -> Result<ObjectRef> {
        let brep = Self::read_brep(path)?;
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Shape".to_string());
        self.add_object(doc, &label, &brep, *placement)
    }

    fn selection(&self) -> Result<Vec<ObjectRef>> {
        Ok(self.selection.clone())
    }

    fn read_object(&self, obj: &ObjectRef) -> Result<NativeObject> {
        let shape = self.shape(obj)?;
        Ok(NativeObject {
            label: shape.label.clone(),
            placement: shape.placement,
            tag: shape.tag.clone(),
        })
    }

    fn export_geometry(&self, obj: &ObjectRef) -> Result<String> {
        let shape = self.shape(obj)?;
        check_brep(&shape.brep)?;
        Ok(shape.brep.clone())
    }

    fn set_object_tag(&mut self, obj: &ObjectRef, id: &str) -> Result<()> {
        self.shape_mut(obj)?.tag = Some(id.to_string());
        Ok(())
    }
}

fn check_brep(text: &str) -> Result<()> {
    if text.contains(BREP_MARKER) {
        Ok(())
    } else {
        Err(PlmError::host("Shape is not a valid BREP"))
    }
}

/// `base`, then `base001`, `base002`, ...
fn unique_name<'a>(base: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let taken: Vec<&str> = existing.collect();
    if !taken.contains(&base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}{n:03}"))
        .find(|candidate| !taken.contains(&candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::BREP_SAMPLE;
    use std::io::Write;

    #[test]
    fn test_new_document_names_are_unique() {
        let mut host = MemoryHost::new();
        assert_eq!(host.new_document("part").unwrap(), "part");
        assert_eq!(host.new_document("part").unwrap(), "part001");
        assert_eq!(host.active_document().unwrap(), "part001");
    }

    #[test]
    fn test_no_active_document() {
        let host = MemoryHost::new();
        assert!(matches!(host.active_document(), Err(PlmError::NoActiveDocument)));
    }

    #[test]
    fn test_materialize_rejects_garbage() {
        let mut host = MemoryHost::new();
        let doc = host.new_document("d").unwrap();
        assert!(host.materialize_shape(&doc, "x", "garbage", &Placement::default()).is_err());
        let obj = host.materialize_shape(&doc, "x", BREP_SAMPLE, &Placement::default()).unwrap();
        assert_eq!(host.export_geometry(&obj).unwrap(), BREP_SAMPLE);
    }

    #[test]
    fn test_close_drops_selection() {
        let mut host = MemoryHost::new();
        let doc = host.new_document("d").unwrap();
        let obj = host.add_object(&doc, "x", BREP_SAMPLE, Placement::default()).unwrap();
        host.select(&obj).unwrap();
        host.close_active_document().unwrap();
        assert!(host.selection().unwrap().is_empty());
        assert!(host.document_names().is_empty());
        // closing again is fine
        host.close_active_document().unwrap();
    }

    #[test]
    fn test_open_file_reads_brep() {
        let mut file = tempfile::Builder::new().suffix(".brep").tempfile().unwrap();
        file.write_all(BREP_SAMPLE.as_bytes()).unwrap();

        let mut host = MemoryHost::new();
        let doc = host.open_file(file.path()).unwrap();
        assert_eq!(host.active_document().unwrap(), doc);
        assert_eq!(host.objects(&doc).unwrap().len(), 1);
    }

    #[test]
    fn test_open_missing_file_is_host_error() {
        let mut host = MemoryHost::new();
        let err = host.open_file(Path::new("/nonexistent/part.brep")).unwrap_err();
        assert!(matches!(err, PlmError::Host(_)));
    }
}
