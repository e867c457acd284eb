// ==========================================
// ACR 调校提取工具 - 报告层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("报告写入失败 ({path}): {message}")]
    WriteError { path: String, message: String },

    #[error("JSON 序列化失败: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("TSV 写入失败: {0}")]
    TsvError(#[from] csv::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
