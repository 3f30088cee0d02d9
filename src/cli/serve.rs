use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, server, types::PkceToken};

pub async fn serve() {
    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    if let Err(e) = server::start_api_server(shared_state).await {
        error!("Server stopped. Err: {}", e);
    }
}
