// ==========================================
// 卸柜补货汇总 - 领域类型定义
// ==========================================
// 职责: 单元格取值、配送类型、保留区段名
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 未命中任何关键字时的兜底区段
pub const UNCATEGORIZED_SECTION: &str = "Uncategorized";

/// 汇总表末尾的合计行
pub const TOTAL_ROW: &str = "Total";

/// 未识别出拖车号时的占位名
pub const UNKNOWN_TRAILER: &str = "Unknown Trailer";

// ==========================================
// 单元格取值 (Cell Value)
// ==========================================
// CSV 与 Excel 两种来源统一到同一种表示
// 只有 Text 参与拖车号识别与区段分类
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// 从 CSV 原始字段推断单元格类型
    ///
    /// - 空白 → Empty
    /// - 可解析为数字 → Number
    /// - TRUE/FALSE（不区分大小写）→ Bool
    /// - 其余 → Text（保留原文，不做 trim）
    pub fn from_csv_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            // "nan" / "inf" 之类按文本保留
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "TRUE" => CellValue::Bool(true),
            "FALSE" => CellValue::Bool(false),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// 文本单元格的内容；非文本返回 None
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

// ==========================================
// 配送类型 (Delivery Type)
// ==========================================
// RDC: 拖车含拆零箱（repack cartons > 0）
// HDC: 只有整箱
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryType {
    Rdc,
    Hdc,
}

impl DeliveryType {
    /// 按单个文件的拆零箱合计判定
    pub fn from_repack_total(repack_total: f64) -> Self {
        if repack_total > 0.0 {
            DeliveryType::Rdc
        } else {
            DeliveryType::Hdc
        }
    }

    /// 拖车名后缀，如 "(RDC)"
    pub fn suffix(&self) -> &'static str {
        match self {
            DeliveryType::Rdc => "(RDC)",
            DeliveryType::Hdc => "(HDC)",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryType::Rdc => write!(f, "RDC"),
            DeliveryType::Hdc => write!(f, "HDC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_csv_field() {
        assert_eq!(CellValue::from_csv_field(""), CellValue::Empty);
        assert_eq!(CellValue::from_csv_field("   "), CellValue::Empty);
        assert_eq!(CellValue::from_csv_field(" 3 "), CellValue::Number(3.0));
        assert_eq!(CellValue::from_csv_field("2.5"), CellValue::Number(2.5));
        assert_eq!(CellValue::from_csv_field("true"), CellValue::Bool(true));
        assert_eq!(
            CellValue::from_csv_field("DOG FOOD"),
            CellValue::Text("DOG FOOD".to_string())
        );
        assert_eq!(
            CellValue::from_csv_field("nan"),
            CellValue::Text("nan".to_string())
        );
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Bool(false).to_string(), "FALSE");
    }

    #[test]
    fn test_delivery_type_from_repack_total() {
        assert_eq!(DeliveryType::from_repack_total(5.0), DeliveryType::Rdc);
        assert_eq!(DeliveryType::from_repack_total(0.0), DeliveryType::Hdc);
        assert_eq!(DeliveryType::Rdc.suffix(), "(RDC)");
        assert_eq!(DeliveryType::Hdc.suffix(), "(HDC)");
    }
}
