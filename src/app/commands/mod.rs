// ==========================================
// 卸柜补货汇总 - 命令层（按路由拆分）
// ==========================================
// 职责: 路由级命令，参数为会话 ID + 请求数据
// 返回: 成功为 JSON 字符串，失败为 ErrorResponse JSON
// ==========================================

mod common;
mod report;
mod session;
mod upload;

pub use common::ErrorResponse;
pub use report::*;
pub use session::*;
pub use upload::*;
