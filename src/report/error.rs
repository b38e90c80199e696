// ==========================================
// 卸柜补货汇总 - 展示层错误类型
// ==========================================

use thiserror::Error;

/// 展示层错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("饼图编码失败: {0}")]
    ChartEncode(String),

    #[error("饼图尺寸无效: {width}x{height}")]
    InvalidChartSize { width: u32, height: u32 },

    #[error("饼图没有扇区")]
    EmptyChart,

    #[error("扇区颜色无效: {0}")]
    InvalidColor(String),

    // ===== 自由格式邮件 =====
    #[error("邮件草稿 JSON 无效: {0}")]
    DraftJson(#[from] serde_json::Error),

    #[error("邮件草稿校验失败: {0}")]
    InvalidDraft(String),
}

impl From<image::ImageError> for ReportError {
    fn from(err: image::ImageError) -> Self {
        ReportError::ChartEncode(err.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
