// ==========================================
// 卸柜补货汇总 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xlsm/.xls) / CSV (.csv)
// 说明: 上传内容整体在内存中解析，不落盘
// ==========================================

use crate::domain::types::CellValue;
use crate::domain::UploadedFile;
use crate::importer::data_cleaner::normalize_header;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::stocking_importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

// ==========================================
// RawTable - 解析后的原始表
// ==========================================
// 第一行为表头；每行已按表头长度补齐
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// 取单元格；越界返回 Empty
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }

    /// 按候选列名查找列（trim + 大写 + 合并空白后比较，取第一个命中）
    pub fn find_column(&self, aliases: &[String]) -> Option<usize> {
        let wanted: Vec<String> = aliases.iter().map(|a| normalize_header(a)).collect();
        self.headers
            .iter()
            .position(|h| wanted.contains(&normalize_header(h)))
    }

    fn push_row(&mut self, mut row: Vec<CellValue>) {
        // 跳过完全空白的行
        if row.iter().all(CellValue::is_empty) {
            return;
        }
        row.resize(self.headers.len(), CellValue::Empty);
        self.rows.push(row);
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_bytes(&self, content: &[u8]) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(content);

        // 读取表头（容忍非 UTF-8 导出文件）
        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader("CSV".to_string()));
        }

        let mut table = RawTable {
            headers,
            rows: Vec::new(),
        };

        for (row_idx, result) in reader.byte_records().enumerate() {
            let record = result?;
            if record.len() > table.column_count() {
                debug!(
                    row = row_idx + 1,
                    fields = record.len(),
                    "CSV 行字段数多于表头，多余字段被忽略"
                );
            }
            let row: Vec<CellValue> = record
                .iter()
                .take(table.column_count())
                .map(|field| CellValue::from_csv_field(&String::from_utf8_lossy(field)))
                .collect();
            table.push_row(row);
        }

        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, content: &[u8]) -> ImportResult<RawTable> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(content.to_vec()))
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::MissingHeader(sheet_name.clone()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut table = RawTable {
            headers,
            rows: Vec::new(),
        };

        for data_row in rows {
            table.push_row(data_row.iter().map(excel_cell).collect());
        }

        Ok(table)
    }
}

/// calamine 单元格 → CellValue
fn excel_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        // #N/A、#DIV/0! 等错误单元格按空值处理
        Data::Error(_) => CellValue::Empty,
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 解析上传文件
    pub fn parse(&self, file: &UploadedFile) -> ImportResult<RawTable> {
        let ext = file.extension();
        match ext.as_str() {
            "csv" => CsvParser.parse_bytes(&file.content),
            "xlsx" | "xlsm" | "xls" => ExcelParser.parse_bytes(&file.content),
            _ => Err(ImportError::UnsupportedFormat(if ext.is_empty() {
                file.file_name.clone()
            } else {
                ext
            })),
        }
    }

    /// 从磁盘读取文件并封装为上传文件
    pub fn read_upload<P: AsRef<Path>>(file_path: P) -> ImportResult<UploadedFile> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(UploadedFile::new(file_name, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_content() {
        let content = "CUSTOM BLOCK,FULL CASE CARTONS,REPACK CARTONS\nDOG FOOD,3,0\nTOYS,2.5,1\n";

        let table = CsvParser.parse_bytes(content.as_bytes()).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.headers[0], "CUSTOM BLOCK");
        assert_eq!(*table.cell(0, 0), CellValue::Text("DOG FOOD".to_string()));
        assert_eq!(*table.cell(1, 1), CellValue::Number(2.5));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let content = "CUSTOM BLOCK,REPACK CARTONS\nDOG,1\n,\nCAT,2\n";

        let table = CsvParser.parse_bytes(content.as_bytes()).unwrap();

        // 应跳过空行
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_csv_parser_pads_short_rows_and_strips_bom() {
        let content = "\u{feff}CUSTOM BLOCK,REPACK CARTONS,NOTE\nDOG,1\n";

        let table = CsvParser.parse_bytes(content.as_bytes()).unwrap();

        assert_eq!(table.headers[0], "CUSTOM BLOCK");
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(*table.cell(0, 2), CellValue::Empty);
    }

    #[test]
    fn test_csv_parser_empty_content() {
        let result = CsvParser.parse_bytes(b"");
        assert!(matches!(result, Err(ImportError::MissingHeader(_))));
    }

    #[test]
    fn test_find_column_normalizes_headers() {
        let table = RawTable {
            headers: vec!["  custom   block ".to_string(), "Stocking Time (hrs)".to_string()],
            rows: Vec::new(),
        };

        assert_eq!(table.find_column(&["CUSTOM BLOCK".to_string()]), Some(0));
        assert_eq!(table.find_column(&["STOCKING TIME (HRS)".to_string()]), Some(1));
        assert_eq!(table.find_column(&["REPACK CARTONS".to_string()]), None);
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let file = UploadedFile::new("notes.txt", b"hello".to_vec());
        let result = UniversalFileParser.parse(&file);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_excel_parser_garbage_content() {
        let result = ExcelParser.parse_bytes(b"definitely not a workbook");
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_read_upload_from_disk() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "CUSTOM BLOCK").unwrap();
        writeln!(temp_file, "DOG").unwrap();

        let upload = UniversalFileParser::read_upload(temp_file.path()).unwrap();
        assert_eq!(upload.content, b"CUSTOM BLOCK\nDOG\n".to_vec());

        let missing = UniversalFileParser::read_upload("non_existent.csv");
        assert!(matches!(missing, Err(ImportError::FileNotFound(_))));
    }
}
