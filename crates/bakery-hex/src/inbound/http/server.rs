use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    serve, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::bakery_service::BakeryService;
use crate::errors::AppError;
use bakery_types::domain::baked_good::BakedGood;
use bakery_types::domain::bakery::Bakery;
use bakery_types::ports::bakery_repository::BakeryRepository;

pub const WELCOME_HTML: &str = "<h1>Bakery GET API</h1>";

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

#[derive(Clone)]
pub struct HttpServer<R>
where
    R: BakeryRepository,
{
    pub service: Arc<BakeryService<R>>,
    pub config: HttpServerConfig,
}

impl<R> HttpServer<R>
where
    R: BakeryRepository + Send + Sync + 'static,
{
    pub async fn new(service: BakeryService<R>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let app = router(self.service.clone()).layer(trace_layer);

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

/// Route table for the five read endpoints.
pub fn router<R>(service: Arc<BakeryService<R>>) -> Router
where
    R: BakeryRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/bakeries", get(list_bakeries::<R>))
        .route("/bakeries/{id}", get(get_bakery::<R>))
        .route("/baked_goods/by_price", get(baked_goods_by_price::<R>))
        .route(
            "/baked_goods/most_expensive",
            get(most_expensive_baked_good::<R>),
        )
        .with_state(service)
}

async fn index() -> Html<&'static str> {
    Html(WELCOME_HTML)
}

async fn list_bakeries<R>(
    State(service): State<Arc<BakeryService<R>>>,
) -> Result<Json<Vec<Bakery>>, AppError>
where
    R: BakeryRepository + Send + Sync + 'static,
{
    let list = service.list_bakeries().await?;
    Ok(Json(list))
}

async fn get_bakery<R>(
    State(service): State<Arc<BakeryService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Bakery>, AppError>
where
    R: BakeryRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let bakery = service.get_bakery(id).await?;
    Ok(Json(bakery))
}

async fn baked_goods_by_price<R>(
    State(service): State<Arc<BakeryService<R>>>,
) -> Result<Json<Vec<BakedGood>>, AppError>
where
    R: BakeryRepository + Send + Sync + 'static,
{
    let list = service.baked_goods_by_price().await?;
    Ok(Json(list))
}

async fn most_expensive_baked_good<R>(
    State(service): State<Arc<BakeryService<R>>>,
) -> Result<Json<BakedGood>, AppError>
where
    R: BakeryRepository + Send + Sync + 'static,
{
    let good = service.most_expensive_baked_good().await?;
    Ok(Json(good))
}

/// Path ids are unsigned decimal integers; anything else is rejected before the service runs.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest(format!("invalid id {raw:?}")));
    }
    raw.parse::<i64>()
        .map_err(|e| AppError::BadRequest(format!("invalid id {raw:?}: {e}")))
}
