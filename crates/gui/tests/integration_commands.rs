//! Integration tests for the PanelCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use plm_client::fixtures::object_json;
use plm_client::{HttpMethod, HttpTransport, MemoryHost, Session, Settings};
use plm_gui::actions::Panel;
use plm_gui::command::{execute_json, execute_json_batch};
use plm_gui::harness::TestHarness;
use plm_gui::i18n::{set_lang, Lang};
use plm_gui::state::NoticeLevel;
use serde_json::json;

fn harness() -> TestHarness {
    set_lang(Lang::En);
    TestHarness::new()
}

#[test]
fn test_command_search_builds_tree() {
    let mut h = harness();
    h.transport().respond(
        HttpMethod::Get,
        "/api/basic_object?name=bracket",
        json!([
            {"id": "1", "name": "bracket-small", "parents": [], "children": ["2"]},
            {"id": "2", "name": "bracket-small-hole", "parents": ["1"], "children": []}
        ]),
    );

    let resp = execute_json(&mut h.panel, r#"{"command": "search", "name": "bracket"}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["count"], 2);
    let roots = data["tree"]["roots"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["id"], "1");
    assert_eq!(roots[0]["children"][0]["id"], "2");
}

#[test]
fn test_command_empty_search_warns() {
    let mut h = harness();
    let resp = execute_json(&mut h.panel, r#"{"command": "search", "name": ""}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("Please enter a part name!"));
    assert!(h.transport().calls().is_empty());
}

#[test]
fn test_unreachable_host_is_one_error_notice() {
    set_lang(Lang::En);
    let session = Session::new(
        HttpTransport::new("http://127.0.0.1:1"),
        MemoryHost::new(),
        &Settings::default(),
    );
    let mut panel = Panel::new(session);

    let resp = execute_json(&mut panel, r#"{"command": "find_all"}"#).unwrap();
    assert!(!resp.success);
    let notices: Vec<_> = panel.state.notices().collect();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(!notices[0].text.is_empty());
    assert!(panel.state.result.is_none());
}

#[test]
fn test_command_save_creates_then_updates() {
    let mut h = harness();
    h.add_selected_shape("gusset").unwrap();
    h.transport()
        .respond(HttpMethod::Post, "/api/basic_object/", object_json("g-1", "gusset", &[], &[]));
    h.transport()
        .respond(HttpMethod::Get, "/api/basic_object/g-1", object_json("g-1", "gusset", &[], &[]));
    h.transport()
        .respond(HttpMethod::Patch, "/api/basic_object/g-1", object_json("g-1", "gusset", &[], &[]));

    let responses = execute_json_batch(&mut h.panel, r#"[{"command": "save"}, {"command": "save"}]"#).unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[0].data.as_ref().unwrap()["action"], "created");
    assert_eq!(responses[1].data.as_ref().unwrap()["action"], "updated");
    assert_eq!(responses[1].data.as_ref().unwrap()["id"], "g-1");

    assert_eq!(h.transport().count(HttpMethod::Post), 1);
    assert_eq!(h.transport().count(HttpMethod::Patch), 1);
    assert_eq!(h.notice_texts(), vec!["Object created: g-1", "Object updated: g-1"]);
}

#[test]
fn test_command_save_without_selection() {
    let mut h = harness();
    let resp = execute_json(&mut h.panel, r#"{"command": "save"}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("Nothing is selected"));
    assert_eq!(h.error_count(), 0);
    assert!(h.transport().calls().is_empty());
}

#[test]
fn test_command_subsystem_without_children() {
    let mut h = harness();
    h.script_object("1", "plate", &[], &[]);

    let responses = execute_json_batch(
        &mut h.panel,
        r#"[{"command": "load", "id": "1"}, {"command": "subsystem"}]"#,
    )
    .unwrap();
    assert!(responses[1].success);
    assert_eq!(responses[1].data.as_ref().unwrap()["empty"], "down");
    assert_eq!(h.notice_texts(), vec!["No subsystems"]);
}

#[test]
fn test_command_subsystem_single_child_loads_it() {
    let mut h = harness();
    h.script_object("1", "frame", &[], &["2"]);
    h.script_object("2", "leg", &["1"], &[]);

    execute_json(&mut h.panel, r#"{"command": "load", "id": "1"}"#).unwrap();
    let resp = execute_json(&mut h.panel, r#"{"command": "subsystem"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["loaded"]["id"], "2");
    assert!(h.panel.state.pending_choice.is_none());
}

#[test]
fn test_command_supersystem_prefers_visited_parent() {
    let mut h = harness();
    h.script_object("A", "stand", &[], &["C"]);
    h.script_object("B", "frame", &[], &["C"]);
    h.script_object("C", "bolt", &["A", "B"], &[]);

    let responses = execute_json_batch(
        &mut h.panel,
        r#"[
            {"command": "load", "id": "B"},
            {"command": "load", "id": "C"},
            {"command": "supersystem"}
        ]"#,
    )
    .unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[2].data.as_ref().unwrap()["loaded"]["id"], "B");
}

#[test]
fn test_command_supersystem_offers_choice() {
    let mut h = harness();
    h.script_object("A", "stand", &[], &["C"]);
    h.script_object("B", "frame", &[], &["C"]);
    h.script_object("C", "bolt", &["A", "B"], &[]);

    execute_json(&mut h.panel, r#"{"command": "load", "id": "C"}"#).unwrap();
    let resp = execute_json(&mut h.panel, r#"{"command": "supersystem"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["direction"], "up");
    assert_eq!(data["choose"][1]["name"], "frame");

    let resp = execute_json(&mut h.panel, r#"{"command": "choose", "id": "A"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["document"], "A");

    let resp = execute_json(&mut h.panel, r#"{"command": "choose", "id": "B"}"#).unwrap();
    assert!(!resp.success);
}

#[test]
fn test_command_load_in_current_document() {
    let mut h = harness();
    h.script_object("1", "frame", &[], &["2"]);
    h.script_object("2", "leg", &["1"], &[]);

    let resp = execute_json(&mut h.panel, r#"{"command": "load_in_current", "id": "2"}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("No active document"));

    let responses = execute_json_batch(
        &mut h.panel,
        r#"[
            {"command": "load", "id": "1"},
            {"command": "select_row", "id": "2"},
            {"command": "load_in_current"}
        ]"#,
    )
    .unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[2].data.as_ref().unwrap()["document"], "1");
    assert_eq!(h.document_count(), 1);
    assert_eq!(h.host().objects("1").unwrap().len(), 2);
}

#[test]
fn test_command_empty_results_raise_info_notice() {
    let mut h = harness();
    h.transport().respond(HttpMethod::Get, "/api/basic_object?name=sprocket", json!([]));
    h.transport().respond(HttpMethod::Get, "/api/basic_objects", json!({"basic_objects": []}));

    let responses = execute_json_batch(
        &mut h.panel,
        r#"[{"command": "search", "name": "sprocket"}, {"command": "find_all"}]"#,
    )
    .unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[0].data.as_ref().unwrap()["count"], 0);
    assert_eq!(h.notice_texts(), vec!["No objects found with this name!", "No objects found!"]);
    assert_eq!(h.error_count(), 0);
}

#[test]
fn test_command_subsystem_in_current_document() {
    let mut h = harness();
    h.script_object("1", "frame", &[], &["2"]);
    h.script_object("2", "leg", &["1"], &[]);

    let responses = execute_json_batch(
        &mut h.panel,
        r#"[
            {"command": "load", "id": "1"},
            {"command": "set_navigation_mode", "in_current": true},
            {"command": "subsystem"}
        ]"#,
    )
    .unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[2].data.as_ref().unwrap()["loaded"]["document"], "1");
    assert_eq!(h.document_count(), 1);
    assert_eq!(h.host().objects("1").unwrap().len(), 2);

    execute_json(&mut h.panel, r#"{"command": "set_navigation_mode", "in_current": false}"#).unwrap();
    let resp = execute_json(&mut h.panel, r#"{"command": "subsystem"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["loaded"]["document"], "2");
    assert_eq!(h.document_count(), 1);
    assert_eq!(h.host().objects("2").unwrap().len(), 1);
}

#[test]
fn test_command_inspect_reports_history_and_notices() {
    let mut h = harness();
    h.script_object("1", "plate", &[], &[]);

    let json = r#"[
        {"command": "load", "id": "1"},
        {"command": "subsystem"},
        {"command": "inspect"}
    ]"#;
    let responses = execute_json_batch(&mut h.panel, json).unwrap();
    let data = responses[2].data.as_ref().unwrap();
    assert_eq!(data["history"], json!(["1"]));
    assert_eq!(data["last_loaded"]["id"], "1");
    assert_eq!(data["notices"][0]["level"], "info");

    let resp = execute_json(&mut h.panel, r#"{"command": "dismiss_notices"}"#).unwrap();
    assert!(resp.success);
    assert!(h.notice_texts().is_empty());
}

#[test]
fn test_invalid_json_is_rejected() {
    let mut h = harness();
    assert!(execute_json(&mut h.panel, "not json").is_err());
    assert!(execute_json_batch(&mut h.panel, r#"{"command": "save"}"#).is_err());
}
