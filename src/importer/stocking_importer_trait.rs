// ==========================================
// 卸柜补货汇总 - 补货明细导入 Trait
// ==========================================
// 职责: 定义导入接口（不包含实现）
// ==========================================

use crate::domain::types::CellValue;
use crate::domain::{LineItem, TrailerRecord, UploadRecord, UploadedFile};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawTable;

// ==========================================
// IngestedFile - 单文件导入产物
// ==========================================
#[derive(Debug, Clone)]
pub struct IngestedFile {
    pub items: Vec<LineItem>,
    pub trailer: Option<TrailerRecord>,
    pub upload: UploadRecord,
}

// ==========================================
// StockingImporter Trait
// ==========================================
// 用途: 补货明细导入主接口
// 实现者: StockingImporterImpl
pub trait StockingImporter: Send + Sync {
    /// 导入单个上传文件
    ///
    /// # 参数
    /// - file: 上传文件（内容已读入内存）
    ///
    /// # 返回
    /// - Ok(IngestedFile): 明细行 + 拖车记录（如识别到）+ 上传记录
    /// - Err: 格式不支持、文件无法解析
    ///
    /// # 导入流程
    /// 1. 按扩展名解析
    /// 2. 识别拖车号
    /// 3. 字段映射与数值化
    /// 4. 按本文件拆零箱合计判定 RDC/HDC
    fn import_file(&self, file: &UploadedFile) -> ImportResult<IngestedFile>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始表（第一行为表头）
    fn parse_bytes(&self, content: &[u8]) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将原始表映射为明细行
    ///
    /// # 参数
    /// - source_file: 源文件名
    /// - table: 原始表
    ///
    /// # 说明
    /// 缺失的列按空值处理，不报错
    fn map_table(&self, source_file: &str, table: &RawTable) -> Vec<LineItem>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 数值强制转换
    ///
    /// # 返回
    /// - 可解析的数值；无法解析、空值、NaN/∞ 一律为 0
    fn coerce_numeric(&self, cell: &CellValue) -> f64;
}
