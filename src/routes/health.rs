use actix_web::{web, HttpResponse};

use crate::startup::BrandName;

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus {
        status: "OK".into(),
        message: "Backend running".into(),
    })
}

pub async fn index(brand: web::Data<BrandName>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("{} Backend Running ✔", brand.0))
}
