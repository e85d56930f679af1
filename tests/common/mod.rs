//! Common test utilities

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{connect_info::MockConnectInfo, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use connection_info::{build_app, Config, TransportMeta};

/// Stand-in for the geolocation provider, bound to an ephemeral port
pub struct FakeGeo {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    addresses: Arc<Mutex<Vec<String>>>,
}

impl FakeGeo {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn addresses(&self) -> Vec<String> {
        self.addresses.lock().unwrap().clone()
    }
}

/// Spawn a fake provider answering every lookup with `status` and `body`
pub async fn spawn_fake_geo(status: StatusCode, body: serde_json::Value) -> FakeGeo {
    let hits = Arc::new(AtomicUsize::new(0));
    let addresses = Arc::new(Mutex::new(Vec::new()));

    let handler_hits = hits.clone();
    let handler_addresses = addresses.clone();
    let app = Router::new().route(
        "/:ip/json/",
        get(move |Path(ip): Path<String>| {
            let hits = handler_hits.clone();
            let addresses = handler_addresses.clone();
            let body = body.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                addresses.lock().unwrap().push(ip);
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake geo server");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeGeo {
        base_url: format!("http://{}", addr),
        hits,
        addresses,
    }
}

/// Config pointing the enricher at a fake provider
pub fn config_for(geo: &FakeGeo) -> Config {
    Config {
        geo_api_url: geo.base_url.clone(),
        ..Config::default()
    }
}

/// Application router with mocked transport metadata for `remote`
pub fn test_app(config: Config, remote: &str) -> Router {
    let transport = TransportMeta::new(remote.parse().expect("valid socket address"))
        .with_local("127.0.0.1:3000".parse().unwrap());

    build_app(config)
        .expect("Failed to build app")
        .layer(MockConnectInfo(transport))
}
