use plm_stub_server::{router, AppState, Catalog};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let catalog = match parse_seed_arg() {
        Some(Ok(catalog)) => catalog,
        Some(Err(e)) => {
            tracing::error!("{e}");
            return;
        }
        None => Catalog::new(),
    };
    tracing::info!("Catalog seeded with {} object(s)", catalog.len());

    let addr = std::env::var("PLM_STUB_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            return;
        }
    };
    tracing::info!("Stub catalog running on http://{addr}");
    if let Err(e) = axum::serve(listener, router(AppState::new(catalog))).await {
        tracing::error!("Server error: {e}");
    }
}

/// `--seed <path>`: JSON list of object representations
fn parse_seed_arg() -> Option<Result<Catalog, String>> {
    let args: Vec<String> = std::env::args().collect();
    let pos = args.iter().position(|a| a == "--seed")?;
    let Some(path) = args.get(pos + 1) else {
        return Some(Err("--seed needs a file path".to_string()));
    };
    let result = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read seed file {path}: {e}"))
        .and_then(|json| {
            serde_json::from_str::<serde_json::Value>(&json)
                .map_err(|e| format!("Failed to parse seed JSON from {path}: {e}"))
        })
        .map(|seed| Catalog::from_seed(&seed));
    Some(result)
}
