// ==========================================
// ACR 调校提取工具 - 引擎层
// ==========================================
// 职责: 引用解析、覆写提取、键分类、单位格式化、合并、编排
// 红线: 引擎不访问文件系统（编排器经导入层读取），单车失败不致命
// ==========================================

pub mod key_classifier;
pub mod merge;
pub mod orchestrator;
pub mod override_extractor;
pub mod reference_resolver;
pub mod setup_formatter;

// 重导出核心引擎
pub use key_classifier::{categorize, classify, KeyClass};
pub use merge::{MergeEngine, MergeSummary};
pub use orchestrator::{BatchResult, ExtractionOrchestrator, SkipReason, SkippedCar};
pub use override_extractor::OverrideExtractor;
pub use reference_resolver::ReferenceResolver;
pub use setup_formatter::{apply, display_value, format_baseline, ApplyOutcome};
