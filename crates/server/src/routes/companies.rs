use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use models::company::{self, CompanyInput};
use serde_json::Value;
use tracing::info;

use crate::{errors::JsonApiError, metrics, state::ServerState};

#[utoipa::path(
    get, path = "/companies/", tag = "companies",
    responses(
        (status = 200, description = "All companies in creation order", body = [crate::openapi::CompanyDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<company::Model>>, JsonApiError> {
    let rows = state.company_svc.list().await?;
    metrics::COMPANIES_LISTED_TOTAL.inc();
    info!(count = rows.len(), "list companies");
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/companies/", tag = "companies",
    request_body = crate::openapi::CreateCompanyDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Validation Error: field name mapped to messages"),
        (status = 415, description = "Body is not JSON"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<company::Model>), JsonApiError> {
    let Json(body) = payload.inspect_err(|_| metrics::COMPANIES_REJECTED_TOTAL.inc())?;
    let input = CompanyInput::from_json(&body).map_err(|errs| {
        metrics::COMPANIES_REJECTED_TOTAL.inc();
        JsonApiError::validation(&errs)
    })?;

    match state.company_svc.create(input).await {
        Ok(created) => {
            metrics::COMPANIES_CREATED_TOTAL.inc();
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(e) => {
            if e.is_validation() {
                metrics::COMPANIES_REJECTED_TOTAL.inc();
            }
            Err(e.into())
        }
    }
}
