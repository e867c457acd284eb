// ==========================================
// ACR 调校提取工具 - 覆写提取器
// ==========================================
// 职责: 路面变体 → OverrideSet（点分路径 → 类型化值）
// 规则: 按被引用对象类型判定值类型，形状不符即丢弃
//       同一变体内重复键: 后者覆盖前者
// ==========================================

use crate::domain::content::{ContentKind, ContentObject, SurfaceVariant};
use crate::domain::setting::{OverrideSet, SettingValue};
use crate::engine::reference_resolver::ReferenceResolver;
use crate::importer::content_mapper::ContentMapper;
use serde_json::Value;
use tracing::debug;

/// OverrideExtractor - 覆写提取器
pub struct OverrideExtractor<'a> {
    resolver: ReferenceResolver<'a>,
    mapper: ContentMapper,
}

impl<'a> OverrideExtractor<'a> {
    pub fn new(resolver: ReferenceResolver<'a>) -> Self {
        Self {
            resolver,
            mapper: ContentMapper,
        }
    }

    /// 提取单个路面变体的覆写集合
    pub fn extract(&self, variant: &SurfaceVariant) -> OverrideSet {
        let mut overrides = OverrideSet::new();

        for entry in &variant.overrides {
            let target = match self.resolver.resolve(&entry.reference, &variant.name) {
                Some(obj) => obj,
                None => {
                    debug!(key = %entry.key, variant = %variant.name, "覆写引用无法解析，已丢弃");
                    continue;
                }
            };

            match self.typed_value(target) {
                Some(value) => {
                    if overrides.contains_key(&entry.key) {
                        debug!(key = %entry.key, variant = %variant.name, "重复覆写键，以后者为准");
                    }
                    overrides.insert(entry.key.clone(), value);
                }
                None => debug!(
                    key = %entry.key,
                    target = %target.name,
                    type_tag = %target.type_tag,
                    "覆写值形状无法识别，已丢弃"
                ),
            }
        }

        overrides
    }

    /// 按对象类型读取 value
    ///
    /// # 规则
    /// - OverrideFloat + 数值 → Float
    /// - OverrideInteger + 整数值 → Integer（带小数部分的拒绝）
    /// - OverrideDbReference + {row} → DbReference
    /// - 其他 → None
    pub fn typed_value(&self, object: &ContentObject) -> Option<SettingValue> {
        let raw = self.mapper.override_value(object)?;

        match object.kind() {
            ContentKind::OverrideFloat => raw.as_f64().map(SettingValue::Float),
            ContentKind::OverrideInteger => integer_value(raw).map(SettingValue::Integer),
            ContentKind::OverrideDbReference => self
                .mapper
                .row_name(raw)
                .map(|row| SettingValue::DbReference(row.to_string())),
            _ => None,
        }
    }
}

fn integer_value(raw: &Value) -> Option<i64> {
    if let Some(i) = raw.as_i64() {
        return Some(i);
    }

    let f = raw.as_f64()?;
    // i64::MAX as f64 == 2^63，本身已越界
    if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}
