use actix_web::HttpResponse;
use serde::Serialize;

/// Standard success envelope: `{success, data, message?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            success: true,
            data,
            message: None,
        })
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            success: true,
            data,
            message: Some(message.into()),
        })
    }

    pub fn created(data: T, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Created().json(Self {
            success: true,
            data,
            message: Some(message.into()),
        })
    }
}

/// Deletions reply 204 with an empty body.
pub fn no_content() -> HttpResponse {
    HttpResponse::NoContent().finish()
}
