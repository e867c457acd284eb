// ==========================================
// ACR 调校提取工具 - 文件解析器实现
// ==========================================
// 支持: 单车内容 JSON (.json) / 元数据与调校表 (.tsv)
// ==========================================

use crate::domain::content::ContentObject;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{ContentFileParser, TableFileParser};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

// ==========================================
// JSON 内容解析器
// ==========================================
pub struct JsonContentParser;

impl ContentFileParser for JsonContentParser {
    fn parse_to_objects(&self, file_path: &Path) -> ImportResult<Vec<ContentObject>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("json") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let text = fs::read_to_string(path)?;
        self.parse_str(&text).map_err(|e| match e {
            ImportError::InvalidContent { message, .. } => ImportError::InvalidContent {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }
}

impl JsonContentParser {
    /// 从 JSON 文本解析内容对象
    ///
    /// # 规则
    /// - 顶层必须是数组
    /// - 无法识别为内容对象的元素跳过（记 debug 日志）
    pub fn parse_str(&self, text: &str) -> ImportResult<Vec<ContentObject>> {
        let root: serde_json::Value = serde_json::from_str(text)?;

        let elements = match root {
            serde_json::Value::Array(elements) => elements,
            _ => {
                return Err(ImportError::InvalidContent {
                    path: "<memory>".to_string(),
                    message: "顶层不是内容对象数组".to_string(),
                })
            }
        };

        let total = elements.len();
        let mut objects = Vec::with_capacity(total);
        for (idx, element) in elements.into_iter().enumerate() {
            match serde_json::from_value::<ContentObject>(element) {
                Ok(obj) => objects.push(obj),
                Err(e) => tracing::debug!("跳过第 {} 个元素（非内容对象）: {}", idx, e),
            }
        }

        if objects.len() < total {
            tracing::debug!("内容对象 {}/{} 条可用", objects.len(), total);
        }

        Ok(objects)
    }
}

// ==========================================
// TSV 解析器
// ==========================================
pub struct TsvParser;

impl TableFileParser for TsvParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("tsv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(Trim::All)
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// 输入文件收集
// ==========================================

/// 展开命令行输入为内容文件列表
///
/// # 规则
/// - 文件: 原样保留
/// - 目录: 收集其下 *.json（不递归），按文件名排序
/// - 不存在的路径: FileNotFound
pub fn collect_content_files(inputs: &[PathBuf]) -> ImportResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .map(|ext| ext.eq_ignore_ascii_case("json"))
                            .unwrap_or(false)
                })
                .collect();
            found.sort();
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(ImportError::FileNotFound(input.display().to_string()));
        }
    }

    Ok(files)
}
