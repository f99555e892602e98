//! # REST API for Application Settings

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use tracing::info;

use super::mappers::SettingMapper;
use super::{error_response, ApiResult};
use crate::AppState;
use shared::{SetSettingRequest, Setting, SettingListResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(list_settings))
        .route("/settings/:key", get(get_setting).put(set_setting))
}

pub async fn list_settings(State(state): State<AppState>) -> ApiResult<Json<SettingListResponse>> {
    info!("GET /api/settings");

    let settings = state.setting_service.list_settings().await.map_err(error_response)?;
    Ok(Json(SettingMapper::to_setting_list_dto(settings)))
}

pub async fn get_setting(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<Json<Setting>> {
    info!("GET /api/settings/{}", key);

    let setting = state.setting_service.get_setting(&key).await.map_err(error_response)?;
    Ok(Json(SettingMapper::to_dto(setting)))
}

pub async fn set_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<SetSettingRequest>,
) -> ApiResult<Json<Setting>> {
    // Value is not logged
    info!("PUT /api/settings/{}", key);

    let setting = state
        .setting_service
        .set_setting(&key, &request.value)
        .await
        .map_err(error_response)?;
    Ok(Json(SettingMapper::to_dto(setting)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{parse, send, setup_test_state};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_put_then_get_setting() {
        let app = router().with_state(setup_test_state().await);

        let (status, _) = send(&app, Method::GET, "/settings/theme", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::PUT, "/settings/theme", Some(json!({ "value": "dark" }))).await;
        assert_eq!(status, StatusCode::OK);
        let stored: Setting = parse(&body);
        assert_eq!(stored.value, "dark");

        let (_, body) = send(&app, Method::GET, "/settings/theme", None).await;
        let fetched: Setting = parse(&body);
        assert_eq!(fetched, stored);

        let (_, body) = send(&app, Method::GET, "/settings", None).await;
        let all: SettingListResponse = parse(&body);
        assert_eq!(all.settings.len(), 1);
    }
}
