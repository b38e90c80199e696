// ==========================================
// 卸柜补货汇总 - 汇总邮件
// ==========================================
// 1) 固定分组汇总邮件: Push / Backstock / Bulk Backstock
//    每个在汇总中出现的区段一行:
//    "<区段>: <flats> flats, <carts> carts, <pallets> pallets"
//    flats = 整箱, carts = 拆零箱, pallets = 补货工时
// 2) 自由格式邮件: 结构化 JSON 草稿 → 校验 → 字符串拼接
//    草稿只作为数据处理，从不求值
// ==========================================

use crate::config::EmailGrouping;
use crate::domain::{round1, SummaryRow, SummaryTable, TrailerRecord};
use crate::report::error::{ReportError, ReportResult};
use crate::report::page;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAX_CATEGORIES: usize = 32;
pub const MAX_ITEMS_PER_CATEGORY: usize = 200;
pub const MAX_TEXT_CHARS: usize = 500;

const DEFAULT_GREETING: &str = "Hi team,";
const DEFAULT_CLOSING: &str = "Thanks,";

/// 邮件数值格式: 1 位小数，整数不带小数点
pub fn format_quantity(value: f64) -> String {
    let rounded = round1(value);
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

/// 单个区段的邮件行
pub fn format_section_line(row: &SummaryRow) -> String {
    format!(
        "{}: {} flats, {} carts, {} pallets",
        row.section,
        format_quantity(row.full_case_cartons),
        format_quantity(row.repack_cartons),
        format_quantity(row.stocking_hours),
    )
}

// ==========================================
// RecapEmail - 固定分组汇总邮件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecapEmail {
    pub subject: String,
    pub body: String,
}

impl RecapEmail {
    pub fn to_html(&self) -> String {
        page::email_page(&self.subject, &self.body)
    }
}

/// 分组 → 该分组下出现在汇总中的区段行（按分组声明顺序）
pub fn grouped_lines(summary: &SummaryTable, groupings: &[EmailGrouping]) -> Vec<(String, Vec<String>)> {
    groupings
        .iter()
        .map(|grouping| {
            let lines = grouping
                .sections
                .iter()
                .filter_map(|name| summary.section(name))
                .map(format_section_line)
                .collect::<Vec<_>>();
            (grouping.title.clone(), lines)
        })
        .filter(|(_, lines)| !lines.is_empty())
        .collect()
}

/// 生成汇总邮件
///
/// # 参数
/// - summary: 区段汇总表
/// - groupings: 邮件分组
/// - trailers: 本会话识别出的拖车
/// - date: 邮件日期（本地日期）
pub fn compose_recap_email(
    summary: &SummaryTable,
    groupings: &[EmailGrouping],
    trailers: &[TrailerRecord],
    date: NaiveDate,
) -> RecapEmail {
    let subject = format!("Trailer Stocking Recap - {}", date.format("%Y-%m-%d"));

    let mut body = String::new();
    body.push_str(DEFAULT_GREETING);
    body.push_str("\n\n");

    if !trailers.is_empty() {
        let labels: Vec<String> = trailers.iter().map(TrailerRecord::label).collect();
        body.push_str(&format!("Trailers: {}\n\n", labels.join(", ")));
    }

    for (title, lines) in grouped_lines(summary, groupings) {
        body.push_str(&title);
        body.push_str(":\n");
        for line in lines {
            body.push_str(&line);
            body.push('\n');
        }
        body.push('\n');
    }

    body.push_str(DEFAULT_CLOSING);
    body.push('\n');

    RecapEmail { subject, body }
}

// ==========================================
// EmailDraft - 自由格式邮件草稿
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailCategory {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailDraft {
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub closing: Option<String>,
    pub categories: Vec<EmailCategory>,
}

fn check_text(field: &str, text: &str) -> ReportResult<()> {
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(ReportError::InvalidDraft(format!(
            "{} 超过 {} 个字符",
            field, MAX_TEXT_CHARS
        )));
    }
    if text.chars().any(|c| c.is_control() && c != '\t') {
        return Err(ReportError::InvalidDraft(format!("{} 含有控制字符", field)));
    }
    Ok(())
}

impl EmailDraft {
    /// 解析并校验 JSON 草稿
    pub fn from_json(json: &str) -> ReportResult<Self> {
        let draft: EmailDraft = serde_json::from_str(json)?;
        draft.validate()?;
        Ok(draft)
    }

    /// 由汇总表预填（表单 GET）
    pub fn from_recap(summary: &SummaryTable, groupings: &[EmailGrouping]) -> Self {
        Self {
            greeting: Some(DEFAULT_GREETING.to_string()),
            closing: Some(DEFAULT_CLOSING.to_string()),
            categories: grouped_lines(summary, groupings)
                .into_iter()
                .map(|(name, items)| EmailCategory { name, items })
                .collect(),
        }
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.categories.len() > MAX_CATEGORIES {
            return Err(ReportError::InvalidDraft(format!(
                "分类数超过上限 {}",
                MAX_CATEGORIES
            )));
        }
        if let Some(greeting) = &self.greeting {
            check_text("greeting", greeting)?;
        }
        if let Some(closing) = &self.closing {
            check_text("closing", closing)?;
        }

        for (i, category) in self.categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(ReportError::InvalidDraft(format!("第 {} 个分类名称为空", i + 1)));
            }
            check_text("category name", &category.name)?;
            if category.items.len() > MAX_ITEMS_PER_CATEGORY {
                return Err(ReportError::InvalidDraft(format!(
                    "分类 {} 的条目数超过上限 {}",
                    category.name, MAX_ITEMS_PER_CATEGORY
                )));
            }
            for item in &category.items {
                check_text("item", item)?;
            }
        }
        Ok(())
    }

    /// 渲染为纯文本邮件正文
    pub fn render(&self) -> String {
        let mut body = String::new();
        if let Some(greeting) = self.greeting.as_deref().filter(|g| !g.trim().is_empty()) {
            body.push_str(greeting);
            body.push_str("\n\n");
        }
        for category in &self.categories {
            body.push_str(&category.name);
            body.push_str(":\n");
            for item in &category.items {
                body.push_str("- ");
                body.push_str(item);
                body.push('\n');
            }
            body.push('\n');
        }
        if let Some(closing) = self.closing.as_deref().filter(|c| !c.trim().is_empty()) {
            body.push_str(closing);
            body.push('\n');
        }
        body
    }
}

/// JSON 草稿 → 邮件正文
pub fn render_email_draft(json: &str) -> ReportResult<String> {
    Ok(EmailDraft::from_json(json)?.render())
}
