use axum::extract::FromRequest;
use axum::Json;
use serde::Serialize;

use crate::error::RequestError;
use crate::server::constants::API_PREFIX;

pub mod resources;
pub mod users;

/// JSON body whose rejections use the regular error format.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(RequestError))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running...",
        message: format!("api can be found under {API_PREFIX}"),
    })
}
