// ==========================================
// 卸柜补货汇总 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、查询
// 存储: 可选 JSON 文件；文件不存在时使用内置默认值
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::config::section_table::SectionKeywordTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "TRAILER_RECAP_CONFIG";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    Read { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    Parse { path: String, message: String },

    #[error("配置校验失败: {0}")]
    Invalid(String),
}

// ==========================================
// ColumnAliases - 列名别名
// ==========================================
// 匹配规则: trim + 大写 + 合并空白后相等
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAliases {
    pub custom_block: Vec<String>,
    pub full_case_cartons: Vec<String>,
    pub repack_cartons: Vec<String>,
    pub stocking_hours: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            custom_block: vec!["CUSTOM BLOCK".to_string()],
            full_case_cartons: vec!["FULL CASE CARTONS".to_string()],
            repack_cartons: vec!["REPACK CARTONS".to_string()],
            stocking_hours: vec!["STOCKING TIME (HRS)".to_string()],
        }
    }
}

// ==========================================
// EmailGrouping - 汇总邮件分组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailGrouping {
    pub title: String,
    pub sections: Vec<String>,
}

fn default_email_groupings() -> Vec<EmailGrouping> {
    let group = |title: &str, sections: &[&str]| EmailGrouping {
        title: title.to_string(),
        sections: sections.iter().map(|s| s.to_string()).collect(),
    };
    vec![
        group("Push", &["Chemical/Paper", "HBA", "Food", "Pets", "Infants"]),
        group(
            "Backstock",
            &["Toys", "Stationery", "Tech", "Style", "Sports", "BPG/CL/FA"],
        ),
        group("Bulk Backstock", &["C/D", "Kitchen", "Seasonal"]),
    ]
}

// ==========================================
// ChartConfig - 饼图参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: "Workload Distribution by Section".to_string(),
        }
    }
}

// ==========================================
// AppConfig - 完整配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub columns: ColumnAliases,
    pub sections: SectionKeywordTable,
    pub email_groupings: Vec<EmailGrouping>,
    pub chart: ChartConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            columns: ColumnAliases::default(),
            sections: SectionKeywordTable::default(),
            email_groupings: default_email_groupings(),
            chart: ChartConfig::default(),
        }
    }
}

impl AppConfig {
    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sections.validate()?;

        let columns = [
            ("custom_block", &self.columns.custom_block),
            ("full_case_cartons", &self.columns.full_case_cartons),
            ("repack_cartons", &self.columns.repack_cartons),
            ("stocking_hours", &self.columns.stocking_hours),
        ];
        for (key, aliases) in columns {
            if aliases.iter().all(|a| a.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!("列 {} 没有可用的列名", key)));
            }
        }

        for grouping in &self.email_groupings {
            if grouping.title.trim().is_empty() {
                return Err(ConfigError::Invalid("邮件分组标题不能为空".to_string()));
            }
        }

        if self.chart.width < 64 || self.chart.height < 64 {
            return Err(ConfigError::Invalid(format!(
                "饼图尺寸过小: {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        if self.chart.width > 4096 || self.chart.height > 4096 {
            return Err(ConfigError::Invalid(format!(
                "饼图尺寸过大: {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用内置默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: AppConfig::default(),
            source: None,
        }
    }

    /// 使用给定配置（会先校验）
    pub fn from_config(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 命令行显式指定的路径（必须存在）
    ///
    /// # 查找顺序
    /// 1. explicit_path
    /// 2. 环境变量 TRAILER_RECAP_CONFIG（必须存在）
    /// 3. 用户配置目录下 trailer-recap/config.json（不存在则使用默认值）
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            return Self::load_from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::load_from_file(Path::new(trimmed));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    /// 从 JSON 文件加载配置；缺省字段使用默认值
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: display.clone(),
            message: e.to_string(),
        })?;

        let config: AppConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: display.clone(),
            message: e.to_string(),
        })?;
        config.validate()?;

        info!(path = %path.display(), sections = config.sections.rules().len(), "配置加载完成");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 配置来源文件（默认配置为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn section_table(&self) -> &SectionKeywordTable {
        &self.config.sections
    }

    pub fn email_groupings(&self) -> &[EmailGrouping] {
        &self.config.email_groupings
    }

    pub fn chart(&self) -> &ChartConfig {
        &self.config.chart
    }
}

impl ImportConfigReader for ConfigManager {
    fn custom_block_columns(&self) -> &[String] {
        &self.config.columns.custom_block
    }

    fn full_case_columns(&self) -> &[String] {
        &self.config.columns.full_case_cartons
    }

    fn repack_columns(&self) -> &[String] {
        &self.config.columns.repack_cartons
    }

    fn stocking_hours_columns(&self) -> &[String] {
        &self.config.columns.stocking_hours
    }
}

/// 默认配置文件路径: <用户配置目录>/trailer-recap/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("trailer-recap").join("config.json"))
}
