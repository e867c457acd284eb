// ==========================================
// ACR 调校提取工具 - 核心库
// ==========================================
// 用途: 从 Assetto Corsa Rally 内容导出中提取各路面车辆调校
// 流程: 内容 JSON → 基准调校 + 路面覆写 → 合并 → 报告
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 内容对象、参数值、调校结构
pub mod domain;

// 导入层 - 文件解析与记录库
pub mod importer;

// 引擎层 - 解析、分类、格式化、合并
pub mod engine;

// 配置层 - 多级配置
pub mod config;

// 报告层 - JSON / 文本表 / TSV
pub mod report;

// 调校目录 - 按车辆 + 赛段查询
pub mod catalog;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    CarReport, CarSetup, ContentObject, DriveType, ObjectRef, OverrideSet, SettingKind,
    SettingValue, SetupField, SetupReport, Surface,
};

// 引擎
pub use engine::{ExtractionOrchestrator, MergeEngine, OverrideExtractor, ReferenceResolver};

// 配置
pub use config::{ConfigManager, ExtractConfigReader};

// 报告
pub use report::{ReportFormat, ReportWriter};

// 目录
pub use catalog::SetupCatalog;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 程序名（同时用作配置目录名）
pub const APP_NAME: &str = "acr-setup-extract";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, env!("CARGO_PKG_NAME"));
    }
}
