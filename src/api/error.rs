// ==========================================
// 卸柜补货汇总 - API层错误类型
// ==========================================
// 职责: 统一 API 错误，转换展示层错误为用户可读消息
// 说明: 导入失败不走错误通道，按文件记为 UploadOutcome::Rejected
// ==========================================

use crate::i18n::{t, t_with_args};
use crate::report::ReportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 状态错误（"not available" 一类）
    // ==========================================
    #[error("尚未上传数据")]
    NoData,

    #[error("尚未生成汇总")]
    NoSummary,

    #[error("数据尚未分类")]
    NotClassified,

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("会话不存在: {0}")]
    SessionNotFound(String),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("报表生成失败: {0}")]
    ReportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            // 草稿问题属于用户输入错误
            ReportError::DraftJson(e) => ApiError::InvalidInput(e.to_string()),
            ReportError::InvalidDraft(msg) => ApiError::InvalidInput(msg),
            other => ApiError::ReportError(other.to_string()),
        }
    }
}

impl ApiError {
    /// 错误代码（前端/调用方据此分支）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NoData => "NO_DATA",
            ApiError::NoSummary => "NO_SUMMARY",
            ApiError::NotClassified => "NOT_CLASSIFIED",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            ApiError::ReportError(_) => "REPORT_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 本地化的用户提示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NoData => t("errors.no_data"),
            ApiError::NoSummary => t("errors.no_summary"),
            ApiError::NotClassified => t("errors.no_mappings"),
            ApiError::NotFound(what) => t_with_args("errors.not_found", &[("what", what.as_str())]),
            ApiError::SessionNotFound(id) => t_with_args("errors.session_not_found", &[("id", id.as_str())]),
            other => other.to_string(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_draft_errors_become_invalid_input() {
        let err: ApiError = ReportError::InvalidDraft("empty".to_string()).into();
        assert_eq!(err.code(), "INVALID_INPUT");

        let err: ApiError = ReportError::ChartEncode("boom".to_string()).into();
        assert_eq!(err.code(), "REPORT_ERROR");
    }
}
