// ==========================================
// ACR 调校提取工具 - 记录库
// ==========================================
// 职责: 单车内容对象的只读集合 + (name, outer) 索引
// 生命周期: 仅在处理单车期间存在，处理完即丢弃
// ==========================================

use crate::domain::content::{ContentKind, ContentObject};
use std::collections::HashMap;

/// (name, outer) 查找结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Unique(&'a ContentObject),
    NotFound,
    /// 同一 (name, outer) 下存在多个对象
    Ambiguous(usize),
}

impl<'a> Lookup<'a> {
    pub fn unique(self) -> Option<&'a ContentObject> {
        match self {
            Lookup::Unique(obj) => Some(obj),
            _ => None,
        }
    }
}

// ==========================================
// RecordStore
// ==========================================
#[derive(Debug, Default)]
pub struct RecordStore {
    objects: Vec<ContentObject>,
    index: HashMap<(String, Option<String>), Vec<usize>>,
}

impl RecordStore {
    /// 由内容对象列表一次性建立索引
    pub fn from_objects(objects: Vec<ContentObject>) -> Self {
        let mut index: HashMap<(String, Option<String>), Vec<usize>> = HashMap::new();
        for (idx, obj) in objects.iter().enumerate() {
            index
                .entry((obj.name.clone(), obj.outer.clone()))
                .or_default()
                .push(idx);
        }

        Self { objects, index }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// 按 (name, outer) 精确查找
    pub fn lookup(&self, name: &str, outer: Option<&str>) -> Lookup<'_> {
        let key = (name.to_string(), outer.map(str::to_string));
        match self.index.get(&key).map(Vec::as_slice) {
            Some([idx]) => Lookup::Unique(&self.objects[*idx]),
            Some(many) if many.len() > 1 => Lookup::Ambiguous(many.len()),
            _ => Lookup::NotFound,
        }
    }

    /// 按内容类型筛选
    pub fn by_kind(&self, kind: ContentKind) -> impl Iterator<Item = &ContentObject> {
        self.objects.iter().filter(move |o| o.kind() == kind)
    }

    /// 按内容类型 + 名称筛选（不限 outer）
    pub fn named(&self, kind: ContentKind, name: &str) -> Vec<&ContentObject> {
        self.by_kind(kind).filter(|o| o.name == name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(type_tag: &str, name: &str, outer: Option<&str>) -> ContentObject {
        ContentObject {
            type_tag: type_tag.to_string(),
            name: name.to_string(),
            outer: outer.map(str::to_string),
            properties: json!({}),
        }
    }

    #[test]
    fn test_lookup_scoped_by_outer() {
        let store = RecordStore::from_objects(vec![
            object("CarSettingOverrideFloat", "CarSettingOverrideFloat_4", Some("CarSetupVariantsSurface_0")),
            object("CarSettingOverrideFloat", "CarSettingOverrideFloat_4", Some("CarSetupVariantsSurface_1")),
        ]);

        let hit = store
            .lookup("CarSettingOverrideFloat_4", Some("CarSetupVariantsSurface_1"))
            .unique()
            .unwrap();
        assert_eq!(hit.outer.as_deref(), Some("CarSetupVariantsSurface_1"));

        assert_eq!(
            store.lookup("CarSettingOverrideFloat_4", None),
            Lookup::NotFound
        );
    }

    #[test]
    fn test_lookup_ambiguous() {
        let store = RecordStore::from_objects(vec![
            object("CarSettingOverrideFloat", "Dup", Some("V")),
            object("CarSettingOverrideInteger", "Dup", Some("V")),
        ]);

        assert_eq!(store.lookup("Dup", Some("V")), Lookup::Ambiguous(2));
        assert!(store.lookup("Dup", Some("V")).unique().is_none());
    }

    #[test]
    fn test_by_kind_and_named() {
        let store = RecordStore::from_objects(vec![
            object("PhysicsCarSetup", "PhysicsCarSetup_0", None),
            object("CarSetupVariantsSurface", "CarSetupVariantsSurface_0", Some("Car")),
            object("CarSetupVariantsSurface", "CarSetupVariantsSurface_1", Some("Car")),
        ]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.by_kind(ContentKind::SurfaceVariant).count(), 2);
        assert_eq!(
            store
                .named(ContentKind::SurfaceVariant, "CarSetupVariantsSurface_1")
                .len(),
            1
        );
    }
}
