use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::filter::QueryParams;
use crate::manager::{FilterManager, FilterManagerResponse};
use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        managers: state.managers.len(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub managers: usize,
}

/// List configured managers
pub async fn list_managers(State(state): State<AppState>) -> Result<Json<Vec<ManagerResponse>>> {
    Ok(Json(
        state
            .managers
            .values()
            .map(|manager| ManagerResponse::from(manager.as_ref()))
            .collect(),
    ))
}

/// Describe one manager and its filters
pub async fn get_manager(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ManagerResponse>> {
    let manager = find_manager(&state, &name)?;
    Ok(Json(ManagerResponse::from(manager.as_ref())))
}

/// Run a manager against the request's query string
pub async fn search(
    State(state): State<AppState>,
    Path(name): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<FilterManagerResponse>> {
    let manager = find_manager(&state, &name)?;
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());

    tracing::debug!(manager = %name, params = params.len(), "Handling search request");
    let response = manager.handle_request(&params).await?;

    Ok(Json(response))
}

fn find_manager<'a>(state: &'a AppState, name: &str) -> Result<&'a Arc<FilterManager>> {
    state
        .manager(name)
        .ok_or_else(|| AppError::NotFound(format!("Filter manager `{}` not found", name)))
}

#[derive(Debug, Serialize)]
pub struct ManagerResponse {
    pub name: String,
    pub filters: Vec<FilterDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct FilterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub filter_type: String,
    pub request_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub tags: Vec<String>,
}

impl From<&FilterManager> for ManagerResponse {
    fn from(manager: &FilterManager) -> Self {
        let filters = manager
            .filters()
            .iter()
            .map(|(name, entry)| {
                let filter = &entry.filter;
                FilterDescriptor {
                    name: name.clone(),
                    filter_type: filter.config().filter_type.clone(),
                    request_field: filter.request_field().to_string(),
                    field: filter
                        .as_field_aware()
                        .map(|aware| aware.field().to_string()),
                    tags: filter.tags().to_vec(),
                }
            })
            .collect();

        Self {
            name: manager.name().to_string(),
            filters,
        }
    }
}
