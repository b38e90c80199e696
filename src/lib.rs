// ==========================================
// 卸柜补货汇总 - 核心库
// ==========================================
// 流程: 上传表格 → 区段分类 → 剔除 → 区段汇总 → 表格/饼图/邮件
// 会话: 所有可变状态都挂在 WorkingSession 上
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 列名/关键字表/邮件分组
pub mod config;

// 导入层 - CSV / Excel
pub mod importer;

// 引擎层 - 分类与聚合
pub mod engine;

// 展示层 - 表格/饼图/邮件/页面
pub mod report;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 路由级操作
pub mod api;

// 应用层 - 会话状态与命令
pub mod app;

// 命令行
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    LineItem, SummaryRow, SummaryTable, TrailerRecord, UploadOutcome, UploadRecord, UploadedFile,
    WorkingDataset, WorkingSession,
};

// 引擎
pub use engine::{SectionClassifier, StockingAggregator};

// API
pub use api::{ApiError, StockingApi};

// 应用
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Trailer Stocking Recap";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
