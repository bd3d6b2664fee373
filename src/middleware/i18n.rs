// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

/// Request language negotiated from `Accept-Language`. Arabic is the
/// platform default; anything that is not English resolves to it.
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Locale {
    pub const DEFAULT: &'static str = "ar";
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first()
                    .map(|tag| tag.split('-').next().unwrap_or(tag).to_string())
            })
            .unwrap_or_else(|| Self::DEFAULT.to_string());

        Ok(Locale(lang))
    }
}
