// ==========================================
// 卸柜补货汇总 - 字段映射器实现
// ==========================================
// 职责: 源列 → 明细字段映射 + 数值化
// 列名: 通过 ImportConfigReader 读取候选列名（别名）
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::LineItem;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::file_parser::RawTable;
use crate::importer::stocking_importer_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait,
};
use std::sync::Arc;
use tracing::warn;

// ==========================================
// ColumnLayout - 列位置
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub custom_block: Option<usize>,
    pub full_case_cartons: Option<usize>,
    pub repack_cartons: Option<usize>,
    pub stocking_hours: Option<usize>,
}

pub struct FieldMapper {
    config: Arc<dyn ImportConfigReader>,
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new(config: Arc<dyn ImportConfigReader>) -> Self {
        Self {
            config,
            cleaner: DataCleaner,
        }
    }

    /// 解析列位置；缺失的列记 warn 日志
    pub fn resolve_layout(&self, source_file: &str, table: &RawTable) -> ColumnLayout {
        let layout = ColumnLayout {
            custom_block: table.find_column(self.config.custom_block_columns()),
            full_case_cartons: table.find_column(self.config.full_case_columns()),
            repack_cartons: table.find_column(self.config.repack_columns()),
            stocking_hours: table.find_column(self.config.stocking_hours_columns()),
        };

        let missing: Vec<&str> = [
            ("custom_block", layout.custom_block),
            ("full_case_cartons", layout.full_case_cartons),
            ("repack_cartons", layout.repack_cartons),
            ("stocking_hours", layout.stocking_hours),
        ]
        .into_iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            warn!(file = %source_file, missing = ?missing, "缺少列，按空值/0 处理");
        }

        layout
    }

    fn numeric(&self, table: &RawTable, row: usize, col: Option<usize>) -> f64 {
        col.map(|c| self.cleaner.coerce_numeric(table.cell(row, c)))
            .unwrap_or(0.0)
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_table(&self, source_file: &str, table: &RawTable) -> Vec<LineItem> {
        let layout = self.resolve_layout(source_file, table);

        (0..table.row_count())
            .map(|row| LineItem {
                source_file: source_file.to_string(),
                row_number: row + 1,
                custom_block: layout
                    .custom_block
                    .and_then(|c| self.cleaner.custom_block_text(table.cell(row, c))),
                full_case_cartons: self.numeric(table, row, layout.full_case_cartons),
                repack_cartons: self.numeric(table, row, layout.repack_cartons),
                stocking_hours: self.numeric(table, row, layout.stocking_hours),
                section: None,
                raw: table
                    .headers
                    .iter()
                    .cloned()
                    .zip(table.rows[row].iter().cloned())
                    .collect(),
            })
            .collect()
    }
}
