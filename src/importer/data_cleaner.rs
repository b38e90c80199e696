// ==========================================
// 卸柜补货汇总 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 表头归一 / 数值强制转换
// 红线: 数值转换失败一律按 0，不报错
// ==========================================

use crate::domain::types::CellValue;
use crate::importer::stocking_importer_trait::DataCleaner as DataCleanerTrait;

/// 表头归一: trim + 大写 + 连续空白合并为一个空格
pub fn normalize_header(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn coerce_numeric(&self, cell: &CellValue) -> f64 {
        match cell {
            CellValue::Empty => 0.0,
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Number(_) => 0.0,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::Text(s) => {
                // 去掉千分位逗号后再解析，如 "1,250"
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                match cleaned.parse::<f64>() {
                    Ok(n) if n.is_finite() => n,
                    _ => 0.0,
                }
            }
        }
    }
}

impl DataCleaner {
    /// 提取分类用的 CUSTOM BLOCK 文本
    ///
    /// 非文本单元格（数字/布尔/空）不参与分类，返回 None
    pub fn custom_block_text(&self, cell: &CellValue) -> Option<String> {
        self.normalize_null(cell.as_text().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some("".to_string())), None);
        assert_eq!(
            cleaner.normalize_null(Some("  value  ".to_string())),
            Some("value".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_coerce_numeric_never_fails() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_numeric(&CellValue::Number(3.5)), 3.5);
        assert_eq!(cleaner.coerce_numeric(&CellValue::Text(" 2 ".to_string())), 2.0);
        assert_eq!(cleaner.coerce_numeric(&CellValue::Text("1,250".to_string())), 1250.0);
        assert_eq!(cleaner.coerce_numeric(&CellValue::Text("N/A".to_string())), 0.0);
        assert_eq!(cleaner.coerce_numeric(&CellValue::Text("inf".to_string())), 0.0);
        assert_eq!(cleaner.coerce_numeric(&CellValue::Number(f64::NAN)), 0.0);
        assert_eq!(cleaner.coerce_numeric(&CellValue::Bool(true)), 1.0);
        assert_eq!(cleaner.coerce_numeric(&CellValue::Empty), 0.0);
    }

    #[test]
    fn test_custom_block_text_only_for_text_cells() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.custom_block_text(&CellValue::Text(" DOG FOOD ".to_string())),
            Some("DOG FOOD".to_string())
        );
        assert_eq!(cleaner.custom_block_text(&CellValue::Number(13.0)), None);
        assert_eq!(cleaner.custom_block_text(&CellValue::Empty), None);
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Stocking   Time (hrs) "), "STOCKING TIME (HRS)");
        assert_eq!(normalize_header("CUSTOM\tBLOCK"), "CUSTOM BLOCK");
    }
}
