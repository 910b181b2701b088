use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Not found")]
    NotFound,

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Crop {width}x{height} exceeds master {master_width}x{master_height}")]
    CropExceedsMaster {
        width: u32,
        height: u32,
        master_width: u32,
        master_height: u32,
    },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Unsupported article type: {0}")]
    Unsupported(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingField(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::UnknownFormat(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_missing_field() {
        let error = ApiError::MissingField("text");
        assert_eq!(error.to_string(), "Missing required field: text");
    }

    #[test]
    fn test_api_error_unknown_format() {
        let error = ApiError::UnknownFormat("banner".to_string());
        assert_eq!(error.to_string(), "Unknown format: banner");
    }

    #[test]
    fn test_api_error_internal() {
        let error = ApiError::Internal("worker died".to_string());
        assert_eq!(error.to_string(), "Internal error: worker died");
    }

    #[test]
    fn test_render_error_invalid_dimensions() {
        let error = RenderError::InvalidDimensions {
            width: 0,
            height: 628,
        };
        assert_eq!(error.to_string(), "Invalid dimensions: 0x628");
    }

    #[test]
    fn test_render_error_crop_exceeds_master() {
        let error = RenderError::CropExceedsMaster {
            width: 1300,
            height: 628,
            master_width: 1200,
            master_height: 1200,
        };
        assert_eq!(error.to_string(), "Crop 1300x628 exceeds master 1200x1200");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("bad header".to_string());
        assert_eq!(error.to_string(), "PNG encode error: bad header");
    }

    #[test]
    fn test_source_error_not_found() {
        let error = SourceError::NotFound("missing.md".to_string());
        assert_eq!(error.to_string(), "Article not found: missing.md");
    }

    #[test]
    fn test_api_error_from_render_error() {
        let render_error = RenderError::PixmapAllocation;
        let api_error: ApiError = render_error.into();
        match api_error {
            ApiError::Render(_) => {}
            _ => panic!("Expected Render variant"),
        }
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        use axum::response::IntoResponse;

        let response = ApiError::MissingField("text").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::UnknownFormat("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Internal("error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Render(RenderError::PixmapAllocation).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
