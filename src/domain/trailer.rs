// ==========================================
// 卸柜补货汇总 - 拖车与上传记录
// ==========================================

use crate::domain::types::DeliveryType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// TrailerRecord - 拖车记录
// ==========================================
// 每个识别出拖车号的上传文件追加一条，之后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailerRecord {
    pub trailer_id: String,          // 如 "Trailer#123"
    pub delivery_type: DeliveryType, // RDC / HDC
    pub source_file: String,         // 来源文件名
    pub recorded_at: DateTime<Utc>,
}

impl TrailerRecord {
    /// 按单个文件的拆零箱合计创建拖车记录
    pub fn new(trailer_id: impl Into<String>, repack_total: f64, source_file: impl Into<String>) -> Self {
        Self {
            trailer_id: trailer_id.into(),
            delivery_type: DeliveryType::from_repack_total(repack_total),
            source_file: source_file.into(),
            recorded_at: Utc::now(),
        }
    }

    /// 展示名，如 "Trailer#123 (RDC)"
    pub fn label(&self) -> String {
        format!("{} {}", self.trailer_id, self.delivery_type.suffix())
    }
}

impl fmt::Display for TrailerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// UploadRecord - 上传记录（文件名 ↔ 拖车）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub file_name: String,
    pub trailer_label: String, // 拖车展示名或 "Unknown Trailer"
    pub row_count: usize,
    pub uploaded_at: DateTime<Utc>,
}

// ==========================================
// UploadOutcome - 单文件上传结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadOutcome {
    Accepted {
        file_name: String,
        row_count: usize,
        trailer: Option<String>,
    },
    Rejected {
        file_name: String,
        reason: String,
    },
}

impl UploadOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            UploadOutcome::Accepted { file_name, .. } | UploadOutcome::Rejected { file_name, .. } => {
                file_name
            }
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, UploadOutcome::Accepted { .. })
    }
}
