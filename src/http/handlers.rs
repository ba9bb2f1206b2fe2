use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::domain::order::{AdvanceStatus, OrderError, OrderLifecycle, SubmitOrder};
use crate::metrics::Metrics;

use super::errors::{ensure_json_content, json_config, MALFORMED};

/// Route table shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handler))
        .route("/metrics", web::get().to(metrics_handler))
        .service(
            web::resource("/orders")
                .app_data(json_config(true))
                .route(web::post().to(submit_order)),
        )
        .service(web::resource("/orders/{id}").route(web::get().to(get_order)))
        .service(
            web::resource("/orders/{id}/status")
                .app_data(json_config(false))
                .route(web::put().to(update_status)),
        );
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().finish()
}

async fn metrics_handler(metrics: web::Data<Metrics>) -> HttpResponse {
    match metrics.render() {
        Ok(buffer) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buffer),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}

async fn submit_order(
    req: HttpRequest,
    lifecycle: web::Data<OrderLifecycle>,
    metrics: web::Data<Metrics>,
    body: web::Json<SubmitOrder>,
) -> Result<HttpResponse, OrderError> {
    ensure_json_content(&req).inspect_err(|_| metrics.record_rejection(MALFORMED))?;

    let order = lifecycle.submit(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(order))
}

async fn get_order(
    lifecycle: web::Data<OrderLifecycle>,
    path: web::Path<String>,
) -> Result<HttpResponse, OrderError> {
    let order = lifecycle.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

async fn update_status(
    req: HttpRequest,
    lifecycle: web::Data<OrderLifecycle>,
    path: web::Path<String>,
    body: web::Json<AdvanceStatus>,
) -> Result<HttpResponse, OrderError> {
    ensure_json_content(&req)?;

    let order = lifecycle
        .transition(&path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(order))
}
