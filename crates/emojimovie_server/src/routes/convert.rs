//! Codepoint conversion route.

use axum::extract::Query;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    pub seq: Option<String>,
}

/// `GET /convert?seq=U%2B1F680%20U%2B1F315`: converted characters as plain
/// text.
///
/// `seq` is form-decoded, so an unescaped `+` arrives as a space. A missing
/// `seq` converts like an empty one.
pub async fn convert_sequence(Query(params): Query<ConvertParams>) -> String {
    emojimovie_core::convert_opt(params.seq.as_deref())
}
