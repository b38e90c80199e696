// ==========================================
// 卸柜补货汇总 - 区段分类引擎
// ==========================================
// 规则: 按关键字表声明顺序逐区段、逐关键字做不区分大小写的子串匹配
//       先命中者胜；都不命中或标签缺失 → Uncategorized
// 红线: 纯函数、确定性、全函数（任何输入都不会走到错误分支）
// ==========================================

use crate::config::SectionKeywordTable;
use crate::domain::UNCATEGORIZED_SECTION;

// ==========================================
// SectionClassifier - 区段分类器
// ==========================================
#[derive(Debug, Clone)]
pub struct SectionClassifier {
    // (区段名, 大写关键字列表)，保持声明顺序
    rules: Vec<(String, Vec<String>)>,
}

impl SectionClassifier {
    /// 由关键字表构建分类器（关键字预先转大写）
    pub fn new(table: &SectionKeywordTable) -> Self {
        let rules = table
            .rules()
            .iter()
            .map(|rule| {
                let keywords = rule
                    .keywords
                    .iter()
                    .map(|k| k.to_uppercase())
                    // 空关键字会匹配任何标签，直接丢弃
                    .filter(|k| !k.is_empty())
                    .collect();
                (rule.section.clone(), keywords)
            })
            .collect();
        Self { rules }
    }

    /// 分类
    ///
    /// # 参数
    /// - label: CUSTOM BLOCK 文本；非文本/缺失传 None
    ///
    /// # 返回
    /// - 区段名或 "Uncategorized"
    pub fn classify(&self, label: Option<&str>) -> &str {
        let Some(label) = label else {
            return UNCATEGORIZED_SECTION;
        };
        let upper = label.to_uppercase();

        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| upper.contains(k.as_str())))
            .map(|(section, _)| section.as_str())
            .unwrap_or(UNCATEGORIZED_SECTION)
    }

    /// 命中的区段及关键字（映射审计用）
    pub fn explain(&self, label: Option<&str>) -> Option<(&str, &str)> {
        let upper = label?.to_uppercase();
        self.rules.iter().find_map(|(section, keywords)| {
            keywords
                .iter()
                .find(|k| upper.contains(k.as_str()))
                .map(|k| (section.as_str(), k.as_str()))
        })
    }
}

impl Default for SectionClassifier {
    fn default() -> Self {
        Self::new(&SectionKeywordTable::default())
    }
}
