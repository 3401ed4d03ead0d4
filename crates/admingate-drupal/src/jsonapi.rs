//! Thin JSON:API helpers over the authenticated client.

use serde::Deserialize;

use admingate_core::error::AppError;

use crate::client::{Bearer, DrupalClient};

/// Query parameters for a JSON:API collection read.
#[derive(Debug, Default, Clone)]
pub struct JsonApiParams {
    /// Sparse fieldsets, `(resource type, comma-separated fields)`.
    pub fields: Vec<(String, String)>,
    /// Filters, `(field, value)`.
    pub filter: Vec<(String, String)>,
    /// Related resources to include.
    pub include: Option<String>,
    /// Sort expression, e.g. `-created`.
    pub sort: Option<String>,
    /// Page size.
    pub limit: Option<u64>,
    /// Page offset.
    pub offset: Option<u64>,
}

impl JsonApiParams {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        for (resource, fields) in &self.fields {
            query.push((format!("fields[{resource}]"), fields.clone()));
        }
        for (field, value) in &self.filter {
            query.push((format!("filter[{field}]"), value.clone()));
        }
        if let Some(include) = &self.include {
            query.push(("include".to_string(), include.clone()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort".to_string(), sort.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("page[limit]".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("page[offset]".to_string(), offset.to_string()));
        }
        query
    }
}

/// A site path resolved by the backend's decoupled router.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatedPath {
    /// Resource type in `entity--bundle` form.
    pub resource_type: String,
    /// Resource UUID.
    pub uuid: String,
    /// Canonical URL reported by the backend.
    pub canonical: Option<String>,
}

#[derive(Deserialize)]
struct RawTranslation {
    entity: Option<RawEntity>,
    jsonapi: Option<RawJsonApiInfo>,
}

#[derive(Deserialize)]
struct RawEntity {
    #[serde(rename = "type")]
    entity_type: String,
    bundle: String,
    uuid: String,
    canonical: Option<String>,
}

#[derive(Deserialize)]
struct RawJsonApiInfo {
    #[serde(rename = "resourceName")]
    resource_name: Option<String>,
}

/// Converts `node--article` into the `/jsonapi/node/article` path.
fn resource_path(resource_type: &str) -> Result<String, AppError> {
    let (entity, bundle) = resource_type.split_once("--").ok_or_else(|| {
        AppError::validation(format!(
            "Resource type must be entity--bundle, got {resource_type}"
        ))
    })?;
    Ok(format!("/jsonapi/{entity}/{bundle}"))
}

impl DrupalClient {
    /// Fetches a resource collection, returning the `data` array.
    pub async fn get_resource_collection(
        &self,
        bearer: Bearer<'_>,
        resource_type: &str,
        params: &JsonApiParams,
    ) -> Result<Vec<serde_json::Value>, AppError> {
        let path = resource_path(resource_type)?;
        let document = self.get_json(bearer, &path, params.to_query()).await?;

        match document.get("data") {
            Some(serde_json::Value::Array(items)) => Ok(items.clone()),
            _ => Err(AppError::upstream(format!(
                "Collection response for {resource_type} has no data array"
            ))),
        }
    }

    /// Fetches a single resource by UUID, returning the `data` member.
    pub async fn get_resource(
        &self,
        bearer: Bearer<'_>,
        resource_type: &str,
        uuid: &str,
    ) -> Result<serde_json::Value, AppError> {
        let path = format!("{}/{uuid}", resource_path(resource_type)?);
        let document = self.get_json(bearer, &path, Vec::new()).await?;

        document
            .get("data")
            .cloned()
            .ok_or_else(|| AppError::upstream(format!("Resource {resource_type}/{uuid} has no data")))
    }

    /// Resolves a site path via the backend's decoupled router.
    ///
    /// Returns `Ok(None)` when the backend does not know the path.
    pub async fn translate_path(
        &self,
        bearer: Bearer<'_>,
        path: &str,
    ) -> Result<Option<TranslatedPath>, AppError> {
        let query = vec![
            ("path".to_string(), path.to_string()),
            ("_format".to_string(), "json".to_string()),
        ];

        let response = self
            .request(
                bearer,
                "/router/translate-path",
                crate::client::RequestOptions {
                    query,
                    ..Default::default()
                },
            )
            .await?;

        if response.status() == http::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(format!(
                "Path translation returned {status}"
            )));
        }

        let raw: RawTranslation = response.json().await?;
        let Some(entity) = raw.entity else {
            return Ok(None);
        };

        let resource_type = raw
            .jsonapi
            .and_then(|j| j.resource_name)
            .unwrap_or_else(|| format!("{}--{}", entity.entity_type, entity.bundle));

        Ok(Some(TranslatedPath {
            resource_type,
            uuid: entity.uuid,
            canonical: entity.canonical,
        }))
    }
}
