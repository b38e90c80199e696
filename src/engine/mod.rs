// ==========================================
// 卸柜补货汇总 - 引擎层
// ==========================================
// 职责: 区段分类 + 数据集聚合
// 红线: 不做文件解析, 不做展示格式化
// ==========================================

pub mod aggregator;
pub mod classifier;

// 重导出核心引擎
pub use aggregator::{SectionMapping, StockingAggregator};
pub use classifier::SectionClassifier;
