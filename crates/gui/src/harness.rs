//! Headless harness: a panel over a scripted catalog and an in-memory host.

use plm_client::fixtures::{object_json, ScriptedTransport, BREP_SAMPLE};
use plm_client::{CadHost, HttpMethod, MemoryHost, ObjectRef, Placement, Result, Session, Settings};
use serde_json::json;

use crate::actions::Panel;
use crate::state::NoticeLevel;

pub struct TestHarness {
    pub panel: Panel<ScriptedTransport, MemoryHost>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a harness with an empty catalog and no documents.
    pub fn new() -> Self {
        let session = Session::new(ScriptedTransport::new(), MemoryHost::new(), &Settings::default());
        Self {
            panel: Panel::new(session),
        }
    }

    pub fn transport(&self) -> &ScriptedTransport {
        self.panel.session.api().transport()
    }

    pub fn host(&self) -> &MemoryHost {
        self.panel.session.host()
    }

    pub fn host_mut(&mut self) -> &mut MemoryHost {
        self.panel.session.host_mut()
    }

    // ── Catalog scripting ─────────────────────────────────────

    /// Script the object, its children and its parents endpoints. Children
    /// are listed with their ids as names.
    pub fn script_object(&self, id: &str, name: &str, parents: &[&str], children: &[&str]) {
        let transport = self.transport();
        transport.respond(
            HttpMethod::Get,
            &format!("/api/basic_object/{id}"),
            object_json(id, name, parents, children),
        );
        let summaries: Vec<_> = children.iter().map(|c| json!({ "id": c, "name": c })).collect();
        transport.respond(HttpMethod::Get, &format!("/api/basic_object/{id}/children"), json!(summaries));
        transport.respond(HttpMethod::Get, &format!("/api/basic_object/{id}/parents"), json!(parents));
    }

    // ── Host setup ────────────────────────────────────────────

    /// New document holding one selected shape.
    pub fn add_selected_shape(&mut self, label: &str) -> Result<ObjectRef> {
        let host = self.host_mut();
        let doc = host.new_document("work")?;
        let obj = host.add_object(&doc, label, BREP_SAMPLE, Placement::default())?;
        host.select(&obj)?;
        Ok(obj)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn notice_texts(&self) -> Vec<String> {
        self.panel.state.notices().map(|n| n.text.clone()).collect()
    }

    pub fn error_count(&self) -> usize {
        self.panel
            .state
            .notices()
            .filter(|n| n.level == NoticeLevel::Error)
            .count()
    }

    pub fn document_count(&self) -> usize {
        self.host().document_names().len()
    }
}
