use axum::{
    Router,
    routing::{delete, get},
};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use std::{net::SocketAddr, sync::Arc};

use crate::{ServerError, categories, statistics, transactions};
use engine::{Engine, EngineError};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Run `change` under the write lock on the blocking pool, since storage
    /// backends may write and sync files.
    pub(crate) async fn mutate<T, F>(&self, change: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Engine) -> Result<T, EngineError> + Send + 'static,
        T: Send + 'static,
    {
        let mut engine = Arc::clone(&self.engine).write_owned().await;
        let result = tokio::task::spawn_blocking(move || change(&mut *engine))
            .await
            .map_err(|err| EngineError::Persistence(format!("mutation task failed: {err}")))?;
        Ok(result?)
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/latest", get(transactions::latest))
        .route("/transactions/dates", get(statistics::available_dates))
        .route("/transactions/{id}", delete(transactions::remove))
        .route("/summary", get(statistics::summary))
        .route(
            "/categories",
            get(categories::list)
                .post(categories::create)
                .put(categories::rename)
                .delete(categories::remove),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine))).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
