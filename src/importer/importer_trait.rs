// ==========================================
// ACR 调校提取工具 - 导入接口 Trait
// ==========================================
// 职责: 定义文件解析接口（不包含实现）
// ==========================================

use crate::domain::content::ContentObject;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// ContentFileParser Trait
// ==========================================
// 用途: 单车内容文件解析（阶段 0）
// 实现者: JsonContentParser
pub trait ContentFileParser: Send + Sync {
    /// 解析内容文件为内容对象列表
    ///
    /// # 参数
    /// - file_path: 单车 JSON 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<ContentObject>): 内容对象（无序）
    /// - Err: 文件不存在、读取失败、顶层不是数组
    ///
    /// # 说明
    /// - 单个对象缺少 Type/Name 时跳过该对象，不影响其余对象
    fn parse_to_objects(&self, file_path: &Path) -> ImportResult<Vec<ContentObject>>;
}

// ==========================================
// TableFileParser Trait
// ==========================================
// 用途: 元数据表/调校表解析
// 实现者: TsvParser
pub trait TableFileParser: Send + Sync {
    /// 解析表格文件为原始行记录（HashMap<列名, 值>）
    ///
    /// # 返回
    /// - Ok(Vec<HashMap<String, String>>): 行记录列表（已 TRIM，跳过空行）
    /// - Err: 文件不存在、格式错误
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}
