// ==========================================
// 卸柜补货汇总 - 区段汇总领域模型
// ==========================================
// 职责: 区段汇总行 + 合计行
// 说明: 内部保留未舍入值，展示前统一舍入到 1 位小数
// ==========================================

use crate::domain::types::{TOTAL_ROW, UNCATEGORIZED_SECTION};
use serde::{Deserialize, Serialize};

/// 舍入到 1 位小数
pub fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // 避免展示 "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// ==========================================
// SummaryRow - 汇总行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub section: String,
    pub full_case_cartons: f64,
    pub repack_cartons: f64,
    pub stocking_hours: f64,
    /// 工作量占比（%）；合计行为 None
    pub workload_pct: Option<f64>,
}

impl SummaryRow {
    pub fn is_total(&self) -> bool {
        self.section == TOTAL_ROW
    }

    fn rounded(&self) -> SummaryRow {
        SummaryRow {
            section: self.section.clone(),
            full_case_cartons: round1(self.full_case_cartons),
            repack_cartons: round1(self.repack_cartons),
            stocking_hours: round1(self.stocking_hours),
            workload_pct: self.workload_pct.map(round1),
        }
    }
}

// ==========================================
// SummaryTable - 区段汇总表
// ==========================================
// 不变量:
// - sections 按区段名升序
// - total 的各列 = sections 各列之和
// - total 工时 > 0 时，sections 的 workload_pct 之和为 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub sections: Vec<SummaryRow>,
    pub total: SummaryRow,
}

impl SummaryTable {
    /// 区段行 + 合计行
    pub fn rows(&self) -> impl Iterator<Item = &SummaryRow> {
        self.sections.iter().chain(std::iter::once(&self.total))
    }

    pub fn section(&self, name: &str) -> Option<&SummaryRow> {
        self.sections.iter().find(|r| r.section == name)
    }

    pub fn total_hours(&self) -> f64 {
        self.total.stocking_hours
    }

    /// 舍入后的副本（展示用）
    pub fn rounded(&self) -> SummaryTable {
        SummaryTable {
            sections: self.sections.iter().map(SummaryRow::rounded).collect(),
            total: self.total.rounded(),
        }
    }

    /// 饼图切片: (区段, 工作量 %)，排除合计行与残留的 Uncategorized
    pub fn workload_slices(&self) -> Vec<(String, f64)> {
        self.sections
            .iter()
            .filter(|r| r.section != UNCATEGORIZED_SECTION)
            .map(|r| (r.section.clone(), r.workload_pct.unwrap_or(0.0)))
            .collect()
    }
}
