//! HTTP adapter over the bill ledger
//!
//! Routes:
//! - `GET    /health`
//! - `GET    /api/bills/{address}`          bills of a wallet
//! - `GET    /api/bills/{address}/summary`  dashboard figures
//! - `GET    /api/bills/detail/{id}`        single bill
//! - `POST   /api/bills`                    create
//! - `PUT    /api/bills/{id}/payment`       record payment
//! - `DELETE /api/bills/{id}`               delete (creator only)

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use splitbill_ledger::BillLedger;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::context::AppContext;

pub use error::ApiError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<BillLedger>,
}

impl From<&AppContext> for AppState {
    fn from(ctx: &AppContext) -> Self {
        Self {
            ledger: Arc::clone(&ctx.ledger),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // `:key` is a wallet address on GET and a bill id on DELETE; both share one path
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/bills", post(handlers::create_bill))
        .route(
            "/api/bills/:key",
            get(handlers::list_bills).delete(handlers::delete_bill),
        )
        .route("/api/bills/:key/summary", get(handlers::bill_summary))
        .route("/api/bills/:key/payment", put(handlers::record_payment))
        .route("/api/bills/detail/:id", get(handlers::get_bill))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until Ctrl-C / SIGTERM, then flush the ledger
pub async fn serve(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let addr: SocketAddr = ctx.config.bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 SplitBill API listening on http://{}", addr);

    let app = create_router(AppState::from(ctx));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    ctx.shutdown()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
