// ==========================================
// ACR 调校提取工具 - 引用解析器
// ==========================================
// 规则: 目标对象名 = 引用末段; 归属 = 当前路面变体名（强制校验）
// 红线: 零命中或多命中一律返回 None，不报错
// ==========================================

use crate::domain::content::{ContentObject, ObjectRef};
use crate::importer::record_store::{Lookup, RecordStore};
use tracing::debug;

/// ReferenceResolver - 引用解析器
pub struct ReferenceResolver<'a> {
    store: &'a RecordStore,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// 在路面变体作用域内解析引用
    ///
    /// # 参数
    /// - reference: 已解析的引用
    /// - variant_name: 持有该覆写条目的路面变体名
    ///
    /// # 返回
    /// - Some: 唯一匹配 (name == 引用末段, outer == variant_name)
    /// - None: 未找到或存在歧义
    pub fn resolve(&self, reference: &ObjectRef, variant_name: &str) -> Option<&'a ContentObject> {
        if !reference.owner_path.is_empty() && reference.owner_name() != variant_name {
            // 引用字符串自带的归属只作参考，仍以变体名为准
            debug!(
                reference = %reference,
                variant = variant_name,
                "引用归属与路面变体不一致"
            );
        }

        match self
            .store
            .lookup(&reference.object_name, Some(variant_name))
        {
            Lookup::Unique(obj) => Some(obj),
            Lookup::NotFound => {
                debug!(reference = %reference, variant = variant_name, "引用目标不存在");
                None
            }
            Lookup::Ambiguous(count) => {
                debug!(
                    reference = %reference,
                    variant = variant_name,
                    count,
                    "引用目标不唯一，已丢弃"
                );
                None
            }
        }
    }
}
