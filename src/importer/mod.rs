// ==========================================
// 卸柜补货汇总 - 导入层
// ==========================================
// 职责: 上传文件 → 补货明细行 + 拖车记录
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod stocking_importer_impl;
pub mod stocking_importer_trait;
pub mod trailer_extractor;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, RawTable, UniversalFileParser};
pub use stocking_importer_impl::StockingImporterImpl;
pub use trailer_extractor::{extract_trailer_name, find_trailer_in_text};

// 重导出 Trait 接口
pub use stocking_importer_trait::{
    DataCleaner, FieldMapper, FileParser, IngestedFile, StockingImporter,
};
