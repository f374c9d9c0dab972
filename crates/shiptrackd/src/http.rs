//! HTTP transport for the query service.
//!
//! Routes:
//! - `GET /api/shipments/analytics?sellerId=<id>`
//! - `GET /api/shipments/stats?sellerId=<id>`
//! - `GET /api/shipments/alerts?sellerId=<id>`
//! - `GET /health`

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use shipment_store::ShipmentGateway;
use shiptrack_core::{Operation, QueryService, Reply};

/// Query service shared by every worker.
pub type SharedService = QueryService<dyn ShipmentGateway>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerQuery {
    pub seller_id: Option<String>,
}

/// Start the HTTP server and run until shutdown.
pub async fn serve(service: SharedService, bind: &str, workers: Option<usize>) -> std::io::Result<()> {
    tracing::info!(%bind, "starting shiptrack HTTP server");

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(service.clone()))
            .configure(routes)
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    server.bind(bind)?.run().await
}

/// Register every route on an app or scope.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/shipments")
            .route("/analytics", web::get().to(analytics_handler))
            .route("/stats", web::get().to(stats_handler))
            .route("/alerts", web::get().to(alerts_handler)),
    )
    .route("/health", web::get().to(health_handler));
}

async fn analytics_handler(
    service: web::Data<SharedService>,
    query: web::Query<SellerQuery>,
) -> HttpResponse {
    dispatch(&service, Operation::Analytics, &query).await
}

async fn stats_handler(
    service: web::Data<SharedService>,
    query: web::Query<SellerQuery>,
) -> HttpResponse {
    dispatch(&service, Operation::Stats, &query).await
}

async fn alerts_handler(
    service: web::Data<SharedService>,
    query: web::Query<SellerQuery>,
) -> HttpResponse {
    dispatch(&service, Operation::Alerts, &query).await
}

async fn dispatch(service: &SharedService, operation: Operation, query: &SellerQuery) -> HttpResponse {
    let reply = service.handle(operation, query.seller_id.as_deref()).await;
    into_response(reply)
}

fn into_response(reply: Reply) -> HttpResponse {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(reply.body)
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "shiptrackd"
    }))
}
