use actix_web::Responder;

/// Proxy server status
#[actix_web::get("/health")]
pub(crate) async fn get_health_status() -> impl Responder {
    actix_web::web::Json(serde_json::json!({"status": "ok"}))
}

#[actix_web::get("/")]
pub(crate) async fn root() -> impl Responder {
    "It Work"
}
