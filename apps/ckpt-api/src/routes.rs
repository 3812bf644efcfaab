use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use ckpt_service::{
	CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, Error as ServiceError,
	GetRequest, GetResponse, ListResponse, SearchRequest, SearchResponse, UpdateRequest,
	UpdateResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/checkpoints/create", post(create))
		.route("/v1/checkpoints/list", get(list))
		.route("/v1/checkpoints/get", post(get_by_id))
		.route("/v1/checkpoints/search", post(search))
		.route("/v1/checkpoints/update", post(update))
		.route("/v1/checkpoints/delete", post(delete))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn create(
	State(state): State<AppState>,
	Json(payload): Json<CreateRequest>,
) -> Result<Json<CreateResponse>, ApiError> {
	let response = state.service.create(payload).await?;
	Ok(Json(response))
}

async fn list(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list().await?;
	Ok(Json(response))
}

async fn get_by_id(
	State(state): State<AppState>,
	Json(payload): Json<GetRequest>,
) -> Result<Json<GetResponse>, ApiError> {
	let response = state.service.get(payload).await?;
	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;
	Ok(Json(response))
}

async fn update(
	State(state): State<AppState>,
	Json(payload): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
	let response = state.service.update(payload).await?;
	Ok(Json(response))
}

async fn delete(
	State(state): State<AppState>,
	Json(payload): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
	let response = state.service.delete(payload).await?;
	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::Validation { field, message } => ApiError::new(
				StatusCode::UNPROCESSABLE_ENTITY,
				"VALIDATION_FAILED",
				message,
				Some(vec![field]),
			),
			ServiceError::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			ServiceError::Storage { message } => {
				// Storage failures are logged here and surfaced opaquely.
				tracing::error!(%message, "Storage operation failed.");

				ApiError::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"STORAGE_ERROR",
					"Storage operation failed.",
					None,
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody {
			error_code: self.error_code,
			message: self.message,
			fields: self.fields,
		};
		(self.status, Json(body)).into_response()
	}
}
