// ==========================================
// 卸柜补货汇总 - 数据集聚合引擎
// ==========================================
// 职责: 分类 / 剔除区段 / 区段汇总 / 映射审计
// 输入: WorkingDataset
// 输出: SummaryTable, Vec<SectionMapping>
// ==========================================
// 红线: 不做文件解析, 不做展示舍入
// ==========================================

use crate::domain::{
    LineItem, SummaryRow, SummaryTable, WorkingDataset, TOTAL_ROW, UNCATEGORIZED_SECTION,
};
use crate::engine::classifier::SectionClassifier;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument};

// ==========================================
// SectionMapping - 标签 → 区段映射（审计视图）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMapping {
    /// 原始 CUSTOM BLOCK；非文本/缺失为 None
    pub custom_block: Option<String>,
    pub section: String,
    /// 命中的关键字；Uncategorized 为 None
    pub matched_keyword: Option<String>,
    pub row_count: usize,
}

// 三列累加器
#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    full_case: f64,
    repack: f64,
    hours: f64,
}

impl Totals {
    fn add(&mut self, item: &LineItem) {
        self.full_case += item.full_case_cartons;
        self.repack += item.repack_cartons;
        self.hours += item.stocking_hours;
    }

    fn into_row(self, section: &str, workload_pct: Option<f64>) -> SummaryRow {
        SummaryRow {
            section: section.to_string(),
            full_case_cartons: self.full_case,
            repack_cartons: self.repack,
            stocking_hours: self.hours,
            workload_pct,
        }
    }
}

// ==========================================
// StockingAggregator - 聚合引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StockingAggregator {
    classifier: SectionClassifier,
}

impl StockingAggregator {
    pub fn new(classifier: SectionClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &SectionClassifier {
        &self.classifier
    }

    /// 为每一行写入区段（可重复调用，结果不变）
    #[instrument(skip_all, fields(rows = dataset.len()))]
    pub fn classify(&self, dataset: &mut WorkingDataset) {
        for item in dataset.items_mut() {
            let section = self.classifier.classify(item.custom_block.as_deref());
            item.section = Some(section.to_string());
        }
        debug!("分类完成");
    }

    /// 剔除选中的区段，并始终剔除 Uncategorized
    ///
    /// # 参数
    /// - excluded: 用户选中的区段名（未知名称忽略）
    ///
    /// # 返回
    /// - 删除的行数
    #[instrument(skip_all, fields(excluded = ?excluded))]
    pub fn exclude_sections(&self, dataset: &mut WorkingDataset, excluded: &[String]) -> usize {
        let removed = dataset.retain(|item| {
            let section = item.section_or_uncategorized();
            section != UNCATEGORIZED_SECTION && !excluded.iter().any(|e| e == section)
        });
        info!(removed, remaining = dataset.len(), "区段剔除完成");
        removed
    }

    /// 区段汇总
    ///
    /// # 说明
    /// - 区段按名称升序
    /// - 合计行 = 各区段行之和，占比为 None
    /// - 合计工时为 0 时各区段占比为 0
    pub fn summarize(&self, dataset: &WorkingDataset) -> SummaryTable {
        let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();
        for item in dataset.items() {
            groups
                .entry(item.section_or_uncategorized())
                .or_default()
                .add(item);
        }

        let mut total = Totals::default();
        for group in groups.values() {
            total.full_case += group.full_case;
            total.repack += group.repack;
            total.hours += group.hours;
        }

        let sections = groups
            .into_iter()
            .map(|(section, group)| {
                let pct = if total.hours > 0.0 {
                    100.0 * group.hours / total.hours
                } else {
                    0.0
                };
                group.into_row(section, Some(pct))
            })
            .collect();

        SummaryTable {
            sections,
            total: total.into_row(TOTAL_ROW, None),
        }
    }

    /// 分类 → 剔除 → 汇总
    pub fn process(&self, dataset: &mut WorkingDataset, excluded: &[String]) -> SummaryTable {
        self.classify(dataset);
        self.exclude_sections(dataset, excluded);
        let summary = self.summarize(dataset);
        info!(
            sections = summary.sections.len(),
            total_hours = summary.total_hours(),
            "汇总完成"
        );
        summary
    }

    /// 标签 → 区段映射，按首次出现顺序，附行数
    pub fn mappings(&self, dataset: &WorkingDataset) -> Vec<SectionMapping> {
        let mut index: HashMap<(Option<&str>, &str), usize> = HashMap::new();
        let mut mappings: Vec<SectionMapping> = Vec::new();

        for item in dataset.items() {
            let key = (
                item.custom_block.as_deref(),
                item.section_or_uncategorized(),
            );
            match index.get(&key) {
                Some(&pos) => mappings[pos].row_count += 1,
                None => {
                    index.insert(key, mappings.len());
                    let matched_keyword = self
                        .classifier
                        .explain(key.0)
                        .filter(|(section, _)| *section == key.1)
                        .map(|(_, keyword)| keyword.to_string());
                    mappings.push(SectionMapping {
                        custom_block: item.custom_block.clone(),
                        section: key.1.to_string(),
                        matched_keyword,
                        row_count: 1,
                    });
                }
            }
        }

        mappings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(block: Option<&str>, full: f64, repack: f64, hours: f64) -> LineItem {
        LineItem {
            source_file: "t.csv".to_string(),
            row_number: 1,
            custom_block: block.map(str::to_string),
            full_case_cartons: full,
            repack_cartons: repack,
            stocking_hours: hours,
            section: None,
            raw: Vec::new(),
        }
    }

    fn dataset(items: Vec<LineItem>) -> WorkingDataset {
        let mut ds = WorkingDataset::new();
        ds.append(items);
        ds
    }

    #[test]
    fn test_single_row_summary() {
        let agg = StockingAggregator::default();
        let mut ds = dataset(vec![item(Some("DOG FOOD"), 3.0, 0.0, 2.0)]);

        let summary = agg.process(&mut ds, &[]);

        assert_eq!(summary.sections.len(), 1);
        let pets = summary.section("Pets").unwrap();
        assert_eq!(pets.full_case_cartons, 3.0);
        assert_eq!(pets.repack_cartons, 0.0);
        assert_eq!(pets.stocking_hours, 2.0);
        assert_eq!(pets.workload_pct, Some(100.0));
        assert_eq!(summary.total.section, TOTAL_ROW);
        assert_eq!(summary.total.full_case_cartons, 3.0);
        assert_eq!(summary.total.stocking_hours, 2.0);
        assert_eq!(summary.total.workload_pct, None);
    }

    #[test]
    fn test_uncategorized_rows_are_removed() {
        let agg = StockingAggregator::default();
        let mut ds = dataset(vec![
            item(None, 5.0, 5.0, 5.0),
            item(Some("ZZZ"), 1.0, 1.0, 1.0),
            item(Some("TOYS"), 1.0, 0.0, 1.0),
        ]);

        let summary = agg.process(&mut ds, &[]);

        assert_eq!(ds.len(), 1);
        assert!(summary.section(UNCATEGORIZED_SECTION).is_none());
        assert_eq!(summary.total.stocking_hours, 1.0);
    }

    #[test]
    fn test_exclusion_is_idempotent() {
        let agg = StockingAggregator::default();
        let mut ds = dataset(vec![
            item(Some("DOG"), 1.0, 0.0, 1.0),
            item(Some("TOYS"), 1.0, 0.0, 1.0),
            item(Some("KITCHEN"), 1.0, 0.0, 1.0),
        ]);
        let excluded = vec!["Toys".to_string()];

        agg.classify(&mut ds);
        let first = agg.exclude_sections(&mut ds, &excluded);
        let after_first = ds.items().to_vec();
        let second = agg.exclude_sections(&mut ds, &excluded);

        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(ds.items(), after_first.as_slice());
    }

    #[test]
    fn test_sections_sorted_and_total_is_sum() {
        let agg = StockingAggregator::default();
        let mut ds = dataset(vec![
            item(Some("TOYS"), 2.0, 1.0, 1.5),
            item(Some("DOG"), 1.0, 2.0, 0.5),
            item(Some("COFFEE"), 4.0, 0.0, 2.0),
            item(Some("LEGOS"), 1.0, 1.0, 1.0),
        ]);

        let summary = agg.process(&mut ds, &[]);

        let names: Vec<&str> = summary.sections.iter().map(|r| r.section.as_str()).collect();
        assert_eq!(names, vec!["Food", "Pets", "Toys"]);

        let full: f64 = summary.sections.iter().map(|r| r.full_case_cartons).sum();
        let repack: f64 = summary.sections.iter().map(|r| r.repack_cartons).sum();
        let hours: f64 = summary.sections.iter().map(|r| r.stocking_hours).sum();
        assert_eq!(summary.total.full_case_cartons, full);
        assert_eq!(summary.total.repack_cartons, repack);
        assert_eq!(summary.total.stocking_hours, hours);

        let pct: f64 = summary.sections.iter().filter_map(|r| r.workload_pct).sum();
        assert!((pct - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_zero_hours_gives_zero_pct() {
        let agg = StockingAggregator::default();
        let mut ds = dataset(vec![
            item(Some("DOG"), 1.0, 0.0, 0.0),
            item(Some("TOYS"), 1.0, 0.0, 0.0),
        ]);

        let summary = agg.process(&mut ds, &[]);

        assert!(summary.sections.iter().all(|r| r.workload_pct == Some(0.0)));
    }

    #[test]
    fn test_summary_of_empty_dataset() {
        let agg = StockingAggregator::default();
        let summary = agg.summarize(&WorkingDataset::new());
        assert!(summary.sections.is_empty());
        assert_eq!(summary.total.stocking_hours, 0.0);
    }

    #[test]
    fn test_mappings_first_seen_order_with_counts() {
        let agg = StockingAggregator::default();
        let mut ds = dataset(vec![
            item(Some("TOYS"), 0.0, 0.0, 0.0),
            item(Some("DOG"), 0.0, 0.0, 0.0),
            item(Some("TOYS"), 0.0, 0.0, 0.0),
            item(None, 0.0, 0.0, 0.0),
        ]);
        agg.classify(&mut ds);

        let mappings = agg.mappings(&ds);

        assert_eq!(mappings.len(), 3);
        assert_eq!(mappings[0].custom_block.as_deref(), Some("TOYS"));
        assert_eq!(mappings[0].section, "Toys");
        assert_eq!(mappings[0].matched_keyword.as_deref(), Some("TOY"));
        assert_eq!(mappings[0].row_count, 2);
        assert_eq!(mappings[1].section, "Pets");
        assert_eq!(mappings[1].matched_keyword.as_deref(), Some("DOG"));
        assert_eq!(mappings[2].custom_block, None);
        assert_eq!(mappings[2].section, UNCATEGORIZED_SECTION);
        assert_eq!(mappings[2].matched_keyword, None);
    }
}
