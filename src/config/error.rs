// ==========================================
// ACR 调校提取工具 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("配置值无效 [{key}]: {message}")]
    ConfigValueError { key: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
