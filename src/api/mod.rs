// ==========================================
// 卸柜补货汇总 - API层
// ==========================================
// 职责: 路由级操作，编排导入 / 引擎 / 展示
// 会话: 由调用方（app::state）传入 WorkingSession
// ==========================================

pub mod error;
pub mod stocking_api;

pub use error::{ApiError, ApiResult};
pub use stocking_api::{
    ChartView, DashboardView, ExclusionFormView, MappingsView, ProcessResult, SectionDetailsView,
    StockingApi, SummaryView,
};
