// ==========================================
// 卸柜补货汇总 - 展示层
// ==========================================
// 职责: 汇总表 / 饼图 / 汇总邮件 / HTML 页面
// 红线: 只读汇总结果，不修改工作数据集
// ==========================================

pub mod chart;
pub mod email;
pub mod error;
pub mod page;
pub mod table;

pub use chart::{build_pie_chart, to_data_url, ChartSlice, PieChart};
pub use email::{
    compose_recap_email, format_quantity, format_section_line, render_email_draft, EmailCategory,
    EmailDraft, RecapEmail,
};
pub use error::{ReportError, ReportResult};
pub use table::{html_escape, render_summary_html, render_summary_text};
