// ==========================================
// ACR 调校提取工具 - 提取配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::Surface;
use std::path::Path;

// ==========================================
// ExtractConfigReader Trait
// ==========================================
// 用途: 编排器读取变体命名、输出目录、显示名
// 实现者: ConfigManager
pub trait ExtractConfigReader: Send + Sync {
    /// 获取路面对应的变体对象名
    ///
    /// # 默认值
    /// - tarmac: CarSetupVariantsSurface_0
    /// - gravel: CarSetupVariantsSurface_1
    fn variant_name(&self, surface: Surface) -> &str;

    /// 获取报告输出目录
    ///
    /// # 默认值
    /// - output
    fn output_dir(&self) -> &Path;

    /// 文件名主干 → 车辆显示名
    ///
    /// # 逻辑
    /// 1. 配置了映射: 使用映射值
    /// 2. 否则: 主干中的 `_` 替换为空格
    fn display_name(&self, file_stem: &str) -> String;
}
