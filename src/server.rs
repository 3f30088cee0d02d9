use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{delete, get, post},
};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{Res, api, config, info, types::PkceToken};

/// Assembles every route the local server exposes.
///
/// `state` carries the PKCE verifier between `musicfinder auth` and the
/// `/callback` route.
pub fn router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
        .route("/api/transcript", get(api::transcript))
        .route("/api/playlist", post(api::playlist))
        .route("/api/ytdlp-status", get(api::ytdlp_status))
        .route("/api/downloads", get(api::list_downloads))
        .route("/api/download", post(api::download))
        .route("/api/downloads/{filename}", delete(api::delete_download))
        .route("/api/whosampled", get(api::whosampled))
        .nest_service("/downloads", ServeDir::new(config::download_dir()))
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("musicfinder API running on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
