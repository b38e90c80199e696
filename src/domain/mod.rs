// ==========================================
// 卸柜补货汇总 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含文件解析逻辑,不含分类/汇总逻辑
// ==========================================

pub mod session;
pub mod stocking;
pub mod summary;
pub mod trailer;
pub mod types;

// 重导出核心类型
pub use session::WorkingSession;
pub use stocking::{LineItem, UploadedFile, WorkingDataset};
pub use summary::{round1, SummaryRow, SummaryTable};
pub use trailer::{TrailerRecord, UploadOutcome, UploadRecord};
pub use types::{CellValue, DeliveryType, TOTAL_ROW, UNCATEGORIZED_SECTION, UNKNOWN_TRAILER};
