// ==========================================
// 卸柜补货汇总 - 拖车号识别
// ==========================================
// 规则: 文本单元格匹配 `Trailer#<非空白串>`，# 前可有一个空白
// 顺序: 先列后行，返回第一个命中；表头不参与
// ==========================================

use crate::importer::file_parser::RawTable;
use regex::Regex;
use std::sync::LazyLock;

static TRAILER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Trailer\s?#\S+").expect("拖车号正则必须合法")
});

/// 在单个文本中查找拖车号
pub fn find_trailer_in_text(text: &str) -> Option<&str> {
    TRAILER_PATTERN.find(text).map(|m| m.as_str())
}

/// 扫描整张表，返回第一个拖车号
///
/// # 说明
/// - 非文本单元格跳过
/// - 只返回一个结果，不收集全部命中
pub fn extract_trailer_name(table: &RawTable) -> Option<String> {
    for col in 0..table.column_count() {
        for row in 0..table.row_count() {
            if let Some(text) = table.cell(row, col).as_text() {
                if let Some(found) = find_trailer_in_text(text) {
                    return Some(found.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_find_trailer_in_text() {
        assert_eq!(find_trailer_in_text("Load Trailer#123 door 4"), Some("Trailer#123"));
        assert_eq!(find_trailer_in_text("Trailer #A-77"), Some("Trailer #A-77"));
        assert_eq!(find_trailer_in_text("Trailer# 123"), None);
        assert_eq!(find_trailer_in_text("trailer#123"), None);
    }

    #[test]
    fn test_extract_column_then_row_order() {
        // (row 0, col 1) 与 (row 1, col 0) 都命中；先列后行 → 取第 0 列
        let table = RawTable {
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![
                vec![text("DOG"), text("Trailer#FIRST-BY-ROW")],
                vec![text("Trailer#FIRST-BY-COLUMN"), text("CAT")],
            ],
        };
        assert_eq!(
            extract_trailer_name(&table),
            Some("Trailer#FIRST-BY-COLUMN".to_string())
        );
    }

    #[test]
    fn test_extract_skips_non_text_and_headers() {
        let table = RawTable {
            headers: vec!["Trailer#HEADER".to_string()],
            rows: vec![vec![CellValue::Number(123.0)], vec![CellValue::Empty]],
        };
        assert_eq!(extract_trailer_name(&table), None);
    }
}
