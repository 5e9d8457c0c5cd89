use super::response::{ApiError, ApiResponse};
use super::SharedApi;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use postwallapp::api::{CmdResult, PostwallApi};
use postwallapp::error::WallError;
use postwallapp::model::{now_millis, EditRequest, NewPost, Post};
use postwallapp::store::DataStore;
use serde::Serialize;
use tracing::{error, instrument};

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

fn single(posts: Vec<Post>) -> Result<Post, ApiError> {
    posts
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Wall(WallError::Store("command returned no post".to_string())))
}

/// Runs a facade call on the blocking pool; the store does synchronous I/O.
async fn blocking<S, F>(api: SharedApi<S>, call: F) -> Result<CmdResult, ApiError>
where
    S: DataStore + 'static,
    F: FnOnce(&PostwallApi<S>) -> postwallapp::error::Result<CmdResult> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&api))
        .await
        .map_err(|e| {
            error!(error = %e, "store task did not complete");
            ApiError::Wall(WallError::Store("Store task failed".to_string()))
        })?
        .map_err(ApiError::from)
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: i64,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        timestamp: now_millis(),
    })
}

/// All posts, newest first
#[instrument(skip(api))]
pub async fn list_posts<S: DataStore + 'static>(
    State(api): State<SharedApi<S>>,
) -> ApiResult<Vec<Post>> {
    let result = blocking(api, |api| api.list_posts()).await?;
    Ok(Json(ApiResponse::ok(result.listed_posts)))
}

#[instrument(skip(api))]
pub async fn get_post<S: DataStore + 'static>(
    State(api): State<SharedApi<S>>,
    Path(id): Path<String>,
) -> ApiResult<Post> {
    let result = blocking(api, move |api| api.get_post(&id)).await?;
    Ok(Json(ApiResponse::ok(single(result.listed_posts)?)))
}

/// Responds 201 with the stored post, including its edit code.
#[instrument(skip(api, payload))]
pub async fn create_post<S: DataStore + 'static>(
    State(api): State<SharedApi<S>>,
    payload: Result<Json<NewPost>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let new_post = read_body(payload)?;
    let result = blocking(api, move |api| api.create_post(new_post)).await?;
    let post = single(result.affected_posts)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(post))))
}

#[instrument(skip(api, payload))]
pub async fn update_post<S: DataStore + 'static>(
    State(api): State<SharedApi<S>>,
    Path(id): Path<String>,
    payload: Result<Json<EditRequest>, JsonRejection>,
) -> ApiResult<Post> {
    let request = read_body(payload)?;
    let result = blocking(api, move |api| api.update_post(&id, request)).await?;
    Ok(Json(ApiResponse::ok(single(result.affected_posts)?)))
}

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
