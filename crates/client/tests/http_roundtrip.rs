//! Integration tests: the blocking client against the stub catalog over real HTTP.

use std::net::SocketAddr;

use plm_client::api::CatalogApi;
use plm_client::fixtures::BREP_SAMPLE;
use plm_client::{
    CadHost, HttpMethod, HttpTransport, LoadMode, MemoryHost, Navigation, Placement, Session, Settings, Transport,
    UploadAction,
};
use plm_model::{Coordinates, PartCreationRequest};
use plm_stub_server::{router, AppState, Catalog};
use serde_json::{json, Value};

/// Serve `catalog` on an ephemeral port from a helper thread.
fn spawn_stub(catalog: Catalog) -> String {
    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
            tx.send(listener.local_addr().expect("addr")).expect("send addr");
            axum::serve(listener, router(AppState::new(catalog))).await.expect("serve");
        });
    });
    let addr = rx.recv().expect("stub server address");
    format!("http://{addr}")
}

fn session(base_url: &str) -> Session<HttpTransport, MemoryHost> {
    Session::new(HttpTransport::new(base_url), MemoryHost::new(), &Settings::default())
}

#[test]
fn test_unreachable_host_returns_in_band_error() {
    // port 1 on loopback is not listening
    let transport = HttpTransport::new("http://127.0.0.1:1");
    let body = transport.send(HttpMethod::Get, "/api/basic_objects", None);
    let value: Value = serde_json::from_str(&body).expect("error body is JSON");
    assert!(value["error"].as_str().is_some_and(|e| !e.is_empty()));

    let err = session("http://127.0.0.1:1").find_all().unwrap_err();
    assert!(matches!(err, plm_client::PlmError::Remote(_)));
}

#[test]
fn test_not_found_maps_to_http_error() {
    let base = spawn_stub(Catalog::new());
    let body = HttpTransport::new(&base).send(HttpMethod::Get, "/api/basic_object/nope", None);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["error"], "HTTP 404: Not Found");
}

#[test]
fn test_search_scenario_builds_tree() {
    let seed = json!([
        {"id": "1", "name": "bracket-small", "parents": [], "children": ["2"]},
        {"id": "2", "name": "bracket-small-hole", "parents": ["1"], "children": []},
        {"id": "3", "name": "plate", "parents": [], "children": []}
    ]);
    let base = spawn_stub(Catalog::from_seed(&seed));
    let result = session(&base).search("bracket").unwrap();

    assert_eq!(result.objects.len(), 2);
    assert_eq!(result.tree.roots.len(), 1);
    assert_eq!(result.tree.roots[0].id.as_deref(), Some("1"));
    assert_eq!(result.tree.roots[0].children[0].id.as_deref(), Some("2"));
}

#[test]
fn test_upload_then_fetch_preserves_placement_and_blob() {
    let base = spawn_stub(Catalog::new());
    let mut s = session(&base);
    let placement = Placement {
        position: [12.5, -3.0, 40.0],
        angle: 33.3,
        axis: [0.0, 0.6, 0.8],
    };
    let host = s.host_mut();
    let doc = host.new_document("work").unwrap();
    let obj = host.add_object(&doc, "gusset", BREP_SAMPLE, placement).unwrap();
    host.select(&obj).unwrap();

    let first = s.upload().unwrap();
    assert_eq!(first.action, UploadAction::Created);
    let second = s.upload().unwrap();
    assert_eq!(second.action, UploadAction::Updated);
    assert_eq!(second.id, first.id);

    let fetched = s.api().get(&first.id).unwrap();
    assert!(fetched.coordinates.approx_eq(&Coordinates::from(placement), 1e-9));
    assert_eq!(fetched.brep_string(), Some(BREP_SAMPLE));
    assert_eq!(s.find_all().unwrap().objects.len(), 1);
}

#[test]
fn test_navigation_over_http() {
    let base = spawn_stub(Catalog::new());
    let api = CatalogApi::new(HttpTransport::new(&base));
    let frame = api
        .create(&PartCreationRequest::new("frame", BREP_SAMPLE, Coordinates::default()))
        .unwrap();
    let frame_id = frame["id"].as_str().unwrap().to_string();
    let mut leg = PartCreationRequest::new("leg", BREP_SAMPLE, Coordinates::default());
    leg.parents = vec![frame_id.clone()];
    let leg_id = api.create(&leg).unwrap()["id"].as_str().unwrap().to_string();

    let mut s = session(&base);
    s.load(&frame_id, LoadMode::NewDocument).unwrap();

    match s.descend(LoadMode::NewDocument).unwrap() {
        Navigation::Loaded(out) => assert_eq!(out.id, leg_id),
        other => panic!("expected the leg, got {other:?}"),
    }
    match s.ascend(LoadMode::NewDocument).unwrap() {
        Navigation::Loaded(out) => assert_eq!(out.id, frame_id),
        other => panic!("expected the frame, got {other:?}"),
    }
}
