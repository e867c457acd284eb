// ==========================================
// ACR 调校提取工具 - 配置层
// ==========================================
// 职责: 配置加载与多级覆写
// 来源: 默认值 / JSON 配置文件 / 环境变量 / 命令行
// ==========================================

pub mod config_manager;
pub mod error;
pub mod extract_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, env_keys, ConfigManager, ExtractConfig};
pub use error::{ConfigError, ConfigResult};
pub use extract_config_trait::ExtractConfigReader;
