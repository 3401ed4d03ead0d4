//! Content proxy handlers — article listing and gated page resolution.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use admingate_core::error::{AppError, ErrorKind};
use admingate_drupal::client::Bearer;
use admingate_drupal::jsonapi::JsonApiParams;

use crate::dto::request::PageQuery;
use crate::dto::response::{CollectionResponse, Pagination};
use crate::error::ApiError;
use crate::extractors::session::CurrentSession;
use crate::state::AppState;

/// Sparse fieldset for the article table.
const ARTICLE_FIELDS: &str = "title,path,field_image,uid,created,body";

/// GET /api/articles?page=&limit=
///
/// Proxies the published-article collection with a pagination envelope.
pub async fn list_articles(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<PageQuery>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let page = query.page();
    let limit = query.limit();

    let params = JsonApiParams {
        fields: vec![("node--article".to_string(), ARTICLE_FIELDS.to_string())],
        filter: vec![("status".to_string(), "1".to_string())],
        include: Some("field_image,uid".to_string()),
        sort: Some("-created".to_string()),
        limit: Some(limit),
        offset: Some(query.offset()),
    };

    let data = state
        .drupal
        .get_resource_collection(session.bearer(), "node--article", &params)
        .await?;

    // The collection meta does not reliably carry a count, so total comes
    // from a wide second read.
    let count_params = JsonApiParams {
        filter: vec![("status".to_string(), "1".to_string())],
        limit: Some(100),
        ..Default::default()
    };
    let total = state
        .drupal
        .get_resource_collection(session.bearer(), "node--article", &count_params)
        .await?
        .len() as u64;

    Ok(Json(CollectionResponse {
        data,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        },
    }))
}

/// Gated fallback — resolves a site path against the backend and returns
/// the matching resource.
///
/// Page semantics apply here: an unusable session redirects to sign-in
/// (cookies cleared) instead of answering 401 JSON.
pub async fn resolve_page(State(state): State<AppState>, jar: CookieJar, uri: Uri) -> Response {
    let path = uri.path().to_string();

    // Unmatched API routes fall through to this handler; they are not
    // site paths.
    if path.starts_with("/api") {
        return ApiError(AppError::not_found(format!("No route for {path}"))).into_response();
    }

    let tokens = match state.guard.ensure_valid(&jar).await {
        Ok(tokens) => tokens,
        Err(err)
            if matches!(
                err.kind,
                ErrorKind::NotAuthenticated | ErrorKind::ReauthenticationRequired
            ) =>
        {
            debug!(path = %path, "Session unusable, redirecting to sign-in");
            let redirect: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
            return (
                state.cookies.clear(jar),
                Redirect::temporary(&format!("/signin?redirect={redirect}")),
            )
                .into_response();
        }
        Err(err) => return ApiError(err).into_response(),
    };

    let bearer = Bearer {
        token_type: &tokens.token_type,
        access_token: &tokens.access_token,
    };

    let resolved = match state.drupal.translate_path(bearer, &path).await {
        Ok(Some(resolved)) => resolved,
        Ok(None) => {
            return ApiError(AppError::not_found(format!("Unknown path {path}"))).into_response();
        }
        Err(err) => return ApiError(err).into_response(),
    };

    let resource = match state
        .drupal
        .get_resource(bearer, &resolved.resource_type, &resolved.uuid)
        .await
    {
        Ok(resource) => resource,
        Err(err) => return ApiError(err).into_response(),
    };

    let response = Json(resource).into_response();
    match tokens.rotated {
        Some(pair) => (state.cookies.apply(jar, &pair), response).into_response(),
        None => response,
    }
}
