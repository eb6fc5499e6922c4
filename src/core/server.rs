//! HTTP surface of the formula dispatcher.
//!
//! Every formula is mounted as a `GET` route at its own path. Besides those,
//! the router exposes `GET /health` and a `GET /` index of available routes.
//! Unknown paths and non-GET methods are answered with JSON errors.

use crate::config::settings::ServerSettings;
use crate::core::dispatcher::{Formula, FormulaDispatcher};
use crate::domain::model::{ComputationResult, QueryParams};
use crate::utils::error::{MathApiError, Result};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{Method, Request, Response, Uri},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Span};

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "math-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn index(State(dispatcher): State<FormulaDispatcher>) -> Json<Value> {
    let routes: Vec<&Formula> = dispatcher.routes().collect();
    Json(json!({ "routes": routes }))
}

async fn not_found(uri: Uri) -> MathApiError {
    MathApiError::RouteNotFound {
        path: uri.path().to_string(),
    }
}

async fn method_not_allowed(method: Method, uri: Uri) -> MathApiError {
    MathApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

fn evaluate(
    dispatcher: &FormulaDispatcher,
    path: &str,
    params: HashMap<String, String>,
) -> Result<Json<ComputationResult>> {
    let result = dispatcher.dispatch(path, &QueryParams::from(params))?;
    Ok(Json(result))
}

pub fn build_router(settings: &ServerSettings) -> Router {
    let dispatcher = FormulaDispatcher::new();

    let mut router = Router::new()
        .route("/", get(index))
        .route("/health", get(health));

    for formula in dispatcher.routes() {
        let path = formula.path;
        router = router.route(
            path,
            get(
                move |State(dispatcher): State<FormulaDispatcher>,
                      Query(params): Query<HashMap<String, String>>| async move {
                    evaluate(&dispatcher, path, params)
                },
            ),
        );
    }

    let router = router
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(dispatcher)
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<Body>, _span: &Span| {
                    tracing::debug!("{} {}", request.method(), request.uri());
                })
                .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                    tracing::info!("Response: {} latency: {:?}", response.status(), latency);
                }),
        );

    if settings.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C signal: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Received Ctrl-C, shutting down"),
        _ = terminate => info!("🛑 Received SIGTERM, shutting down"),
    }
}

/// Serves on an already-bound listener until `shutdown` resolves.
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    settings: &ServerSettings,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let app = build_router(settings);

    info!("✅ Server listening on http://{}", addr);
    info!("Route index: http://{}/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("🔄 HTTP server stopped");
    Ok(())
}

pub async fn serve(settings: ServerSettings) -> Result<()> {
    let listener = TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    serve_with_listener(listener, &settings, shutdown_signal()).await
}
