use crate::api::ApiError;
use serde::{Deserialize, Serialize};

// ==========================================
// 公共工具：错误映射、响应序列化
// ==========================================

/// 错误响应（返回给调用方）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息（已本地化）
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

/// 将ApiError转换为JSON字符串
pub(crate) fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: err.code().to_string(),
        message: err.user_message(),
        details: match &err {
            ApiError::SessionNotFound(id) => Some(serde_json::json!({ "session_id": id })),
            _ => None,
        },
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

/// 序列化成功结果
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("序列化失败: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_api_error_shape() {
        let json = map_api_error(ApiError::SessionNotFound("abc".to_string()));
        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.code, "SESSION_NOT_FOUND");
        assert_eq!(parsed.details.unwrap()["session_id"], "abc");
    }
}
