//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Extract and parse an ObjectId from the `{id}` path segment.
///
/// Keeps the raw text too, since response messages echo it back.
pub struct ValidObjectId {
    pub id: ObjectId,
    pub raw: String,
}

impl<S> FromRequestParts<S> for ValidObjectId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidId {
                id: String::new(),
                reason: e.body_text(),
            })?;

        let id = ObjectId::parse_str(&raw).map_err(|e| ApiError::InvalidId {
            id: raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { id, raw })
    }
}

/// JSON request body that falls back to `T::default()` when the request
/// does not declare a JSON content type.
///
/// Browser forms and bare `fetch` calls often omit the header; those get an
/// empty body instead of a 415. A declared JSON body that fails to parse is
/// still rejected.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !declares_json(req.headers()) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `application/json` or any `application/*+json` type.
fn declares_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn json_content_types_are_recognised() {
        assert!(declares_json(&headers("application/json")));
        assert!(declares_json(&headers("Application/JSON; charset=utf-8")));
        assert!(declares_json(&headers("application/merge-patch+json")));
    }

    #[test]
    fn other_content_types_are_not_json() {
        assert!(!declares_json(&HeaderMap::new()));
        assert!(!declares_json(&headers("text/plain")));
        assert!(!declares_json(&headers("application/x-www-form-urlencoded")));
    }
}
