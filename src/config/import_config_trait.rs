// ==========================================
// 卸柜补货汇总 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 字段映射时解析列名
// 实现者: ConfigManager
pub trait ImportConfigReader: Send + Sync {
    /// CUSTOM BLOCK 列的候选列名
    ///
    /// # 默认值
    /// - ["CUSTOM BLOCK"]
    fn custom_block_columns(&self) -> &[String];

    /// 整箱数列的候选列名
    ///
    /// # 默认值
    /// - ["FULL CASE CARTONS"]
    fn full_case_columns(&self) -> &[String];

    /// 拆零箱数列的候选列名
    ///
    /// # 默认值
    /// - ["REPACK CARTONS"]
    fn repack_columns(&self) -> &[String];

    /// 补货工时列的候选列名
    ///
    /// # 默认值
    /// - ["STOCKING TIME (HRS)"]
    fn stocking_hours_columns(&self) -> &[String];
}
