//! Typed catalog endpoints on top of a [`Transport`].

use plm_model::{parse_id_list, parse_response, parse_summaries, CatalogObject, ChildSummary, ObjectId, PartCreationRequest};
use serde_json::Value;

use crate::error::{PlmError, Result};
use crate::transport::{build_url, HttpMethod, Transport};

pub const SEARCH_URL: &str = "/api/basic_object";
pub const LIST_URL: &str = "/api/basic_objects";
pub const OBJECT_URL: &str = "/api/basic_object/{id}";
pub const CHILDREN_URL: &str = "/api/basic_object/{id}/children";
pub const PARENTS_URL: &str = "/api/basic_object/{id}/parents";
pub const CREATE_URL: &str = "/api/basic_object/";

/// Decode a transport body, turning an in-band `{"error": ...}` into [`PlmError::Remote`].
pub fn decode(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body).map_err(|e| PlmError::Decode(e.to_string()))?;
    if let Some(err) = value.as_object().and_then(|obj| obj.get("error")) {
        let msg = err.as_str().map(str::to_string).unwrap_or_else(|| err.to_string());
        return Err(PlmError::Remote(msg));
    }
    Ok(value)
}

/// Catalog service client
pub struct CatalogApi<T> {
    transport: T,
}

impl<T: Transport> CatalogApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call(&self, method: HttpMethod, url: &str, payload: Option<&Value>) -> Result<Value> {
        decode(&self.transport.send(method, url, payload))
    }

    /// `GET /api/basic_object?name=<q>`
    pub fn search(&self, name: &str) -> Result<Vec<CatalogObject>> {
        let url = build_url(SEARCH_URL, &[], &[("name", name)]);
        Ok(parse_response(&self.call(HttpMethod::Get, &url, None)?))
    }

    /// `GET /api/basic_objects`
    pub fn list_all(&self) -> Result<Vec<CatalogObject>> {
        Ok(parse_response(&self.call(HttpMethod::Get, LIST_URL, None)?))
    }

    /// `GET /api/basic_object/{id}`
    pub fn get(&self, id: &str) -> Result<CatalogObject> {
        let url = build_url(OBJECT_URL, &[("id", id)], &[]);
        let value = self.call(HttpMethod::Get, &url, None)?;
        parse_response(&value)
            .into_iter()
            .next()
            .ok_or_else(|| PlmError::Decode(format!("empty response for object {id}")))
    }

    /// `GET /api/basic_object/{id}/children`
    pub fn children(&self, id: &str) -> Result<Vec<ChildSummary>> {
        let url = build_url(CHILDREN_URL, &[("id", id)], &[]);
        Ok(parse_summaries(&self.call(HttpMethod::Get, &url, None)?))
    }

    /// `GET /api/basic_object/{id}/parents`
    pub fn parents(&self, id: &str) -> Result<Vec<ObjectId>> {
        let url = build_url(PARENTS_URL, &[("id", id)], &[]);
        Ok(parse_id_list(&self.call(HttpMethod::Get, &url, None)?))
    }

    /// `POST /api/basic_object/`
    pub fn create(&self, request: &PartCreationRequest) -> Result<Value> {
        self.call(HttpMethod::Post, CREATE_URL, Some(&request.to_payload()))
    }

    /// `PATCH /api/basic_object/{id}`
    pub fn update(&self, id: &str, request: &PartCreationRequest) -> Result<Value> {
        let url = build_url(OBJECT_URL, &[("id", id)], &[]);
        self.call(HttpMethod::Patch, &url, Some(&request.to_payload()))
    }
}
