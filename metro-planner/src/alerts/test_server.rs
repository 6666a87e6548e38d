//! Local alerts endpoint for exercising the HTTP client.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Router, http::StatusCode, routing::get};

pub(crate) const TWO_ALERTS: &str = r#"[
    {"id": 1, "titulo": "Horario", "mensaje": "Servicio normal", "tipo": "INFO"},
    {"id": 2, "titulo": "Cierre", "mensaje": "Estación Gamarra cerrada", "tipo": "PELIGRO"}
]"#;

/// Serves `/alertas`, answering the n-th request with the n-th scripted
/// response and repeating the last one after that.
pub(crate) struct AlertServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl AlertServer {
    pub async fn start(responses: Vec<(StatusCode, &'static str)>) -> Self {
        assert!(!responses.is_empty());
        let responses = Arc::new(responses);
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let app = Router::new().route(
            "/alertas",
            get(move || {
                let counter = counter.clone();
                let responses = responses.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    responses[n.min(responses.len() - 1)]
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Base URL of a port nothing is listening on.
pub(crate) async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
