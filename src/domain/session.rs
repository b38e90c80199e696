// ==========================================
// 卸柜补货汇总 - 工作会话
// ==========================================
// 每个会话独立持有数据集、汇总、拖车与上传记录
// 会话之间不共享任何可变状态
// ==========================================

use crate::domain::stocking::WorkingDataset;
use crate::domain::summary::SummaryTable;
use crate::domain::trailer::{TrailerRecord, UploadRecord};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct WorkingSession {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub dataset: WorkingDataset,
    /// 最近一次处理的汇总；上传新文件或重置后失效
    pub summary: Option<SummaryTable>,
    pub trailers: Vec<TrailerRecord>,
    pub uploads: Vec<UploadRecord>,
}

impl WorkingSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            dataset: WorkingDataset::new(),
            summary: None,
            trailers: Vec::new(),
            uploads: Vec::new(),
        }
    }

    /// 清空会话内容（保留会话 ID）
    pub fn reset(&mut self) {
        self.dataset.clear();
        self.summary = None;
        self.trailers.clear();
        self.uploads.clear();
    }

    pub fn trailer_labels(&self) -> Vec<String> {
        self.trailers.iter().map(TrailerRecord::label).collect()
    }
}
