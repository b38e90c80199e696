use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 会话相关命令
// ==========================================

/// 新建会话
pub fn open_session(state: &AppState) -> Result<String, String> {
    let id = state.open_session().map_err(map_api_error)?;
    to_json(&serde_json::json!({ "session_id": id }))
}

/// 关闭会话
pub fn close_session(state: &AppState, session_id: String) -> Result<String, String> {
    let closed = state.close_session(&session_id).map_err(map_api_error)?;
    to_json(&serde_json::json!({ "closed": closed }))
}

/// GET / - 首页
pub fn dashboard(state: &AppState, session_id: String) -> Result<String, String> {
    let view = state
        .with_session(&session_id, |api, session| Ok(api.dashboard(session)))
        .map_err(map_api_error)?;
    to_json(&view)
}

/// GET /reset - 清空会话
pub fn reset(state: &AppState, session_id: String) -> Result<String, String> {
    tracing::info!("[reset] session_id: {}", session_id);

    state
        .with_session(&session_id, |api, session| {
            api.reset(session);
            Ok(())
        })
        .map_err(map_api_error)?;
    to_json(&serde_json::json!({ "reset": true }))
}
