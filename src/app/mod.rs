// ==========================================
// 卸柜补货汇总 - 应用层
// ==========================================
// 职责: 会话状态 + 路由命令，连接外部调用方与 API
// ==========================================

pub mod commands;
pub mod state;

// 重导出
pub use state::{AppState, WorkingSession};
