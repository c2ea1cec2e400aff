//! Test doubles and sample data.
//!
//! `ScriptedTransport` answers from canned responses keyed by method and URL
//! and records every call, so orchestrator tests can assert on the exact
//! request sequence.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use serde_json::{json, Value};

use crate::transport::{error_body, HttpMethod, Transport};

/// Minimal BREP text used as an opaque geometry blob in tests.
pub const BREP_SAMPLE: &str = "DBRep_DrawableShape\n\nCASCADE Topology V1, (c) Matra-Datavision\nLocations 0\nCurve2ds 0\nCurves 0\nPolygon3D 0\nPolygonOnTriangulations 0\nSurfaces 0\nTriangulations 0\n\nTShapes 0\n";

/// One request seen by [`ScriptedTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub payload: Option<Value>,
}

/// Transport answering from a script
#[derive(Default)]
pub struct ScriptedTransport {
    routes: RefCell<HashMap<(HttpMethod, String), VecDeque<String>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response. Queued responses are consumed in order; the
    /// last one keeps answering.
    pub fn respond(&self, method: HttpMethod, url: &str, body: Value) {
        self.respond_raw(method, url, &body.to_string());
    }

    pub fn respond_raw(&self, method: HttpMethod, url: &str, body: &str) {
        self.routes
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(body.to_string());
    }

    /// Queue an in-band transport failure.
    pub fn fail(&self, method: HttpMethod, url: &str, description: &str) {
        self.respond_raw(method, url, &error_body(description));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, method: HttpMethod) -> usize {
        self.calls.borrow().iter().filter(|c| c.method == method).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, method: HttpMethod, url: &str, payload: Option<&Value>) -> String {
        self.calls.borrow_mut().push(RecordedCall {
            method,
            url: url.to_string(),
            payload: payload.cloned(),
        });

        let mut routes = self.routes.borrow_mut();
        match routes.get_mut(&(method, url.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => error_body("HTTP 404: Not Found"),
        }
    }
}

/// Object representation as the service returns it.
pub fn object_json(id: &str, name: &str, parents: &[&str], children: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "parents": parents,
        "children": children,
        "coordinates": { "x": 0.0, "y": 0.0, "z": 0.0, "angle": 0.0, "axis": { "x": 0.0, "y": 0.0, "z": 1.0 } },
        "bounding_contour": { "brep_files": { "brep_string": BREP_SAMPLE } },
    })
}
