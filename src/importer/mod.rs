// ==========================================
// ACR 调校提取工具 - 导入层
// ==========================================
// 职责: 外部文件 → 内容对象 / 表格行
// 支持: 单车内容 JSON, 元数据与调校 TSV
// ==========================================

// 模块声明
pub mod content_mapper;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod record_store;

// 重导出核心类型
pub use content_mapper::ContentMapper;
pub use error::{ImportError, ImportResult};
pub use file_parser::{collect_content_files, JsonContentParser, TsvParser};
pub use record_store::{Lookup, RecordStore};

// 重导出 Trait 接口
pub use importer_trait::{ContentFileParser, TableFileParser};
