// ==========================================
// 卸柜补货汇总 - 区段关键字表
// ==========================================
// 职责: 区段名 → 关键字列表（有序）
// 红线: 声明顺序即优先级（先命中者胜），不得重排
// ==========================================

use crate::config::config_manager::ConfigError;
use crate::domain::types::{TOTAL_ROW, UNCATEGORIZED_SECTION};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 默认关键字表
///
/// 注意: "KITCHEN PLUG" 归 C/D，因为 C/D 声明在 Kitchen 之前
const DEFAULT_SECTION_KEYWORDS: &[(&str, &[&str])] = &[
    ("Pets", &["PETS", "DOG", "CAT", "LITTER"]),
    ("Toys", &["TOY", "LEGOS", "BOYS ACTION", "E42"]),
    (
        "Chemical/Paper",
        &["CHEMICAL", "PAPER", "BLEACH", "LAUNDRY", "HOUSEHOLD", "AIR FRESHENER"],
    ),
    (
        "HBA",
        &["HBA", "BEAUTY", "HEALTH", "COSMETICS", "SOAP", "HAIR", "OTC", "ORAL", "FEMININE"],
    ),
    ("Infants", &["INFANT", "BABY", "NURSING", "DIAPERS"]),
    (
        "C/D",
        &[
            "C/D", "BED", "BATH", "RUGS", "LAMP", "KITCHEN PLUG", "APPLIANCE", "PILLOWS",
            "FURNITURE", "STORAGE", "PLASTIC", "VACUUM", "VIGNETTE", "HEARTH",
        ],
    ),
    ("Kitchen", &["KITCHEN"]),
    ("Stationery", &["STATIONERY", "OFFICE"]),
    ("BPG/CL/FA", &["BPG", "CL/FA", "BULLSEYE"]),
    ("Sports", &["SPORTS", "OUTDOORS", "SPORT", "LUGG", "AUTO"]),
    (
        "Seasonal",
        &["SEASONAL", "HOLIDAY", "GRILLING", "SOIL", "SEED", "LAWN", "G43"],
    ),
    ("Tech", &["TECH", "ELECTRONICS", "13 - ELEC", "ENTERTAINMENT"]),
    (
        "Style",
        &["STYLE", "APPAREL", "FOLDING", "INTIMATES", "NIT", "HANGING"],
    ),
    (
        "Food",
        &[
            "FOOD", "GROCERY", "WATER", "PASTA", "SPICES", "BAKING", "CEREAL", "COFFEE", "CANDY",
            "COOKIES", "CHIPS", "BEVERAGE",
        ],
    ),
];

// ==========================================
// SectionRule - 单个区段的关键字规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRule {
    pub section: String,
    pub keywords: Vec<String>,
}

// ==========================================
// SectionKeywordTable - 有序关键字表
// ==========================================
// 配置文件中以数组形式出现，保证顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionKeywordTable {
    rules: Vec<SectionRule>,
}

impl SectionKeywordTable {
    pub fn new(rules: Vec<SectionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SectionRule] {
        &self.rules
    }

    /// 区段名（声明顺序）
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.section.as_str())
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.section == name)
    }

    /// 校验关键字表
    ///
    /// - 至少一个区段
    /// - 区段名非空、不重复、不占用保留名（Total / Uncategorized）
    /// - 每个区段至少一个非空关键字
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.is_empty() {
            return Err(ConfigError::Invalid("区段关键字表为空".to_string()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            let name = rule.section.trim();
            if name.is_empty() {
                return Err(ConfigError::Invalid("区段名不能为空".to_string()));
            }
            if name == TOTAL_ROW || name == UNCATEGORIZED_SECTION {
                return Err(ConfigError::Invalid(format!("区段名为保留字: {}", name)));
            }
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::Invalid(format!("区段名重复: {}", name)));
            }
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!("区段 {} 没有关键字", name)));
            }
        }
        Ok(())
    }
}

impl Default for SectionKeywordTable {
    fn default() -> Self {
        let rules = DEFAULT_SECTION_KEYWORDS
            .iter()
            .map(|(section, keywords)| SectionRule {
                section: section.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_order() {
        let table = SectionKeywordTable::default();
        let names: Vec<&str> = table.section_names().collect();
        assert_eq!(names.len(), 14);
        assert_eq!(names[0], "Pets");
        assert_eq!(names[13], "Food");

        let cd = names.iter().position(|n| *n == "C/D").unwrap();
        let kitchen = names.iter().position(|n| *n == "Kitchen").unwrap();
        assert!(cd < kitchen);
    }

    #[test]
    fn test_default_table_is_valid() {
        assert!(SectionKeywordTable::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_reserved_and_duplicate_names() {
        let reserved = SectionKeywordTable::new(vec![SectionRule {
            section: "Total".to_string(),
            keywords: vec!["X".to_string()],
        }]);
        assert!(reserved.validate().is_err());

        let duplicate = SectionKeywordTable::new(vec![
            SectionRule {
                section: "Pets".to_string(),
                keywords: vec!["DOG".to_string()],
            },
            SectionRule {
                section: "Pets".to_string(),
                keywords: vec!["CAT".to_string()],
            },
        ]);
        assert!(duplicate.validate().is_err());

        let no_keywords = SectionKeywordTable::new(vec![SectionRule {
            section: "Pets".to_string(),
            keywords: vec!["  ".to_string()],
        }]);
        assert!(no_keywords.validate().is_err());
    }

    #[test]
    fn test_table_serializes_as_ordered_array() {
        let table = SectionKeywordTable::default();
        let json = serde_json::to_value(&table).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["section"], "Pets");

        let back: SectionKeywordTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }
}
