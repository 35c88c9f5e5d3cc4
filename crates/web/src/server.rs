//! Web server implementation

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::App;

/// Build the application router
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

async fn index(State(app): State<Arc<App>>) -> Html<String> {
    Html(app.render())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Serve the app on an already-bound listener until the task is stopped
pub async fn serve(listener: TcpListener, app: Arc<App>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("serving on http://{}", addr);
    }
    axum::serve(listener, router(app)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::showcase;

    #[tokio::test]
    async fn serves_page_and_health() {
        let (app, report) = showcase();
        assert!(report.is_clean());
        let token = app.session_token().to_string();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(serve(listener, Arc::new(app)));

        let base = format!("http://{addr}");
        let health: serde_json::Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["status"], "ok");

        let page = reqwest::get(&base).await.unwrap().text().await.unwrap();
        assert!(page.contains("id=\"token\""));
        assert!(page.contains(&token));

        handle.abort();
    }
}
