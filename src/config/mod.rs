// ==========================================
// 卸柜补货汇总 - 配置层
// ==========================================
// 职责: 列名别名、区段关键字表、邮件分组、饼图参数
// 存储: 可选 JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod import_config_trait;
pub mod section_table;

// 重导出核心配置管理器
pub use config_manager::{
    default_config_path, AppConfig, ChartConfig, ColumnAliases, ConfigError, ConfigManager,
    EmailGrouping, CONFIG_PATH_ENV,
};
pub use import_config_trait::ImportConfigReader;
pub use section_table::{SectionKeywordTable, SectionRule};
