use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 上传 / 处理相关命令
// ==========================================

/// POST /upload - 从本地路径读取并上传文件
///
/// 读取失败的路径记为 Rejected；结果顺序与 file_paths 一致
pub fn upload_files(
    state: &AppState,
    session_id: String,
    file_paths: Vec<String>,
) -> Result<String, String> {
    tracing::info!("[upload_files] session_id: {}, files: {:?}", session_id, file_paths);

    let outcomes = state
        .with_session(&session_id, |api, session| {
            Ok(api.upload_paths(session, &file_paths))
        })
        .map_err(map_api_error)?;

    to_json(&outcomes)
}

/// GET /process - 剔除表单
pub fn exclusion_form(state: &AppState, session_id: String) -> Result<String, String> {
    let view = state
        .with_session(&session_id, |api, session| api.exclusion_form(session))
        .map_err(map_api_error)?;
    to_json(&view)
}

/// POST /process, GET|POST /exclude_sections - 分类、剔除、汇总
pub fn process(
    state: &AppState,
    session_id: String,
    excluded_sections: Vec<String>,
) -> Result<String, String> {
    tracing::info!(
        "[process] session_id: {}, excluded: {:?}",
        session_id,
        excluded_sections
    );

    let result = state
        .with_session(&session_id, |api, session| {
            api.process(session, &excluded_sections)
        })
        .map_err(|e| {
            tracing::error!("[process] 处理失败: {:?}", e);
            map_api_error(e)
        })?;
    to_json(&result)
}

/// GET|POST /exclude_sections
pub fn exclude_sections(
    state: &AppState,
    session_id: String,
    excluded_sections: Vec<String>,
) -> Result<String, String> {
    process(state, session_id, excluded_sections)
}
