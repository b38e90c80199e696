// ==========================================
// 卸柜补货汇总 - 补货明细领域模型
// ==========================================
// 职责: 上传文件、补货明细行、会话内工作数据集
// ==========================================

use crate::domain::types::{CellValue, UNCATEGORIZED_SECTION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// UploadedFile - 上传文件（整体读入内存）
// ==========================================
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// 小写扩展名（无扩展名时为空串）
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }
}

// ==========================================
// LineItem - 补货明细行
// ==========================================
// 生命周期: 上传时创建，只有 section 在分类阶段写入一次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    // ===== 来源 =====
    pub source_file: String, // 源文件名
    pub row_number: usize,   // 数据行号（从 1 开始，不含表头）

    // ===== 分类输入 =====
    pub custom_block: Option<String>, // CUSTOM BLOCK；非文本单元格为 None

    // ===== 工作量（已数值化，非数字按 0）=====
    pub full_case_cartons: f64,
    pub repack_cartons: f64,
    pub stocking_hours: f64,

    // ===== 派生 =====
    pub section: Option<String>, // 分类结果；未分类为 None

    // ===== 原始行（明细页展示用）=====
    pub raw: Vec<(String, CellValue)>,
}

impl LineItem {
    /// 分类结果；尚未分类的行按 Uncategorized 处理
    pub fn section_or_uncategorized(&self) -> &str {
        self.section.as_deref().unwrap_or(UNCATEGORIZED_SECTION)
    }
}

// ==========================================
// WorkingDataset - 会话工作数据集
// ==========================================
// 追加: 上传；删除: 剔除区段 / 重置
#[derive(Debug, Clone, Default)]
pub struct WorkingDataset {
    items: Vec<LineItem>,
}

impl WorkingDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [LineItem] {
        &mut self.items
    }

    pub fn append(&mut self, items: Vec<LineItem>) {
        self.items.extend(items);
    }

    /// 保留满足条件的行，返回删除的行数
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&LineItem) -> bool,
    {
        let before = self.items.len();
        self.items.retain(keep);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// 所有行都已分类（空数据集视为未分类）
    pub fn is_classified(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.section.is_some())
    }

    /// 当前出现过的区段（按名称排序）
    pub fn distinct_sections(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|i| i.section_or_uncategorized().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn rows_in_section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a LineItem> {
        self.items
            .iter()
            .filter(move |i| i.section_or_uncategorized() == section)
    }

    /// 所有文件表头的并集（按首次出现顺序）
    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = Vec::new();
        for item in &self.items {
            for (header, _) in &item.raw {
                if !headers.contains(header) {
                    headers.push(header.clone());
                }
            }
        }
        headers
    }
}
