// ==========================================
// ACR 调校提取工具 - 参数值与覆写集合
// ==========================================
// 职责: 点分路径 → 类型化参数值
// 用途: 基准参数展开结果 / 路面覆写集合（同一结构）
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// SettingKind - 参数值类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKind {
    Float,
    Integer,
    DbReference,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingKind::Float => write!(f, "float"),
            SettingKind::Integer => write!(f, "integer"),
            SettingKind::DbReference => write!(f, "db-reference"),
        }
    }
}

// ==========================================
// SettingValue - 类型化参数值
// ==========================================
// 序列化: {"kind": "float", "value": 32000.0}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum SettingValue {
    Float(f64),
    Integer(i64),
    /// 外部参数表行标识
    DbReference(String),
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Float(_) => SettingKind::Float,
            SettingValue::Integer(_) => SettingKind::Integer,
            SettingValue::DbReference(_) => SettingKind::DbReference,
        }
    }

    /// 数值视图（行标识返回 None）
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Float(v) => Some(*v),
            SettingValue::Integer(v) => Some(*v as f64),
            SettingValue::DbReference(_) => None,
        }
    }
}

impl fmt::Display for SettingValue {
    /// 原样输出（数值按最短往返格式: 45000 / -2.4 / 0.006）
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Float(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::DbReference(row) => write!(f, "{}", row),
        }
    }
}

// ==========================================
// SettingMap - 点分路径 → 参数值
// ==========================================
// 有序映射，保证输出字节稳定
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingMap {
    entries: BTreeMap<String, SettingValue>,
}

/// 单个路面的覆写集合（提取后不可变，由合并引擎消费一次）
pub type OverrideSet = SettingMap;

impl SettingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入（同键后写覆盖先写）
    pub fn insert(&mut self, key: impl Into<String>, value: SettingValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 是否存在以指定前缀开头的键（如 "Differentials.Front."）
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.entries.keys().any(|k| k.starts_with(prefix))
    }
}

impl FromIterator<(String, SettingValue)> for SettingMap {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
