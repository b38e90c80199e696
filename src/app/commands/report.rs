use crate::app::state::AppState;
use crate::report::to_data_url;

use super::common::{map_api_error, to_json};

// ==========================================
// 汇总 / 图表 / 明细 / 映射 / 邮件命令
// ==========================================

/// GET /summary
pub fn summary_view(state: &AppState, session_id: String) -> Result<String, String> {
    let view = state
        .with_session(&session_id, |api, session| api.summary_view(session))
        .map_err(map_api_error)?;
    to_json(&view)
}

/// GET /generate_chart - PNG 以 data URL 返回
pub fn generate_chart(state: &AppState, session_id: String) -> Result<String, String> {
    let png = state
        .with_session(&session_id, |api, session| api.generate_chart(session))
        .map_err(map_api_error)?;
    to_json(&serde_json::json!({
        "mime_type": "image/png",
        "byte_len": png.len(),
        "data_url": to_data_url(&png),
    }))
}

/// GET /details/<section>
pub fn section_details(
    state: &AppState,
    session_id: String,
    section: String,
) -> Result<String, String> {
    let view = state
        .with_session(&session_id, |api, session| {
            api.section_details(session, &section)
        })
        .map_err(map_api_error)?;
    to_json(&view)
}

/// GET /mappings
pub fn mappings(state: &AppState, session_id: String) -> Result<String, String> {
    let view = state
        .with_session(&session_id, |api, session| api.mappings(session))
        .map_err(map_api_error)?;
    to_json(&view)
}

/// GET /generate_email
pub fn generate_email(state: &AppState, session_id: String) -> Result<String, String> {
    let email = state
        .with_session(&session_id, |api, session| api.generate_email(session))
        .map_err(map_api_error)?;
    to_json(&email)
}

/// GET /email_form - 预填草稿
pub fn email_form_draft(state: &AppState, session_id: String) -> Result<String, String> {
    let draft = state
        .with_session(&session_id, |api, session| Ok(api.email_form_draft(session)))
        .map_err(map_api_error)?;
    to_json(&draft)
}

/// POST /email_form - 渲染提交的 JSON 草稿
pub fn render_email_form(state: &AppState, draft_json: String) -> Result<String, String> {
    let body = state
        .stocking_api
        .render_email_form(&draft_json)
        .map_err(|e| {
            tracing::warn!("[render_email_form] 草稿无效: {}", e);
            map_api_error(e)
        })?;
    to_json(&serde_json::json!({ "body": body }))
}
