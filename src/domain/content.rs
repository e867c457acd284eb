// ==========================================
// ACR 调校提取工具 - 内容对象模型
// ==========================================
// 依据: FModel/CUE4Parse JSON 导出格式（Type/Name/Outer/Properties）
// ==========================================
// 职责: 内容对象、对象引用、路面变体
// 红线: 引用字符串只在导入边界解析一次，下游只使用结构化引用
// ==========================================

use serde::Deserialize;
use std::fmt;

// ===== 内容类型标签 =====
pub const TYPE_PHYSICS_CAR_SETUP: &str = "PhysicsCarSetup";
pub const TYPE_SURFACE_VARIANT: &str = "CarSetupVariantsSurface";
pub const TYPE_OVERRIDE_FLOAT: &str = "CarSettingOverrideFloat";
pub const TYPE_OVERRIDE_INTEGER: &str = "CarSettingOverrideInteger";
pub const TYPE_OVERRIDE_DB_REFERENCE: &str = "CarSettingOverrideValueSetDBReference";

// 引用路径分隔符
const PATH_SEPARATORS: &[char] = &[':', '.', '/'];

// ==========================================
// ContentKind - 内容对象分类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    PhysicsCarSetup,     // 基准调校
    SurfaceVariant,      // 路面变体
    OverrideFloat,       // 浮点覆写值
    OverrideInteger,     // 整数覆写值
    OverrideDbReference, // 参数表行覆写值
    Other,               // 与调校无关的对象
}

impl ContentKind {
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            TYPE_PHYSICS_CAR_SETUP => ContentKind::PhysicsCarSetup,
            TYPE_SURFACE_VARIANT => ContentKind::SurfaceVariant,
            TYPE_OVERRIDE_FLOAT => ContentKind::OverrideFloat,
            TYPE_OVERRIDE_INTEGER => ContentKind::OverrideInteger,
            TYPE_OVERRIDE_DB_REFERENCE => ContentKind::OverrideDbReference,
            _ => ContentKind::Other,
        }
    }
}

// ==========================================
// ContentObject - 内容对象（记录库中的一条）
// ==========================================
// 名称仅在 (name, outer) 组合下唯一
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentObject {
    #[serde(rename = "Type", alias = "type")]
    pub type_tag: String,

    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    /// 所属对象名（顶层对象为空）
    #[serde(rename = "Outer", alias = "outer", default)]
    pub outer: Option<String>,

    /// 类型相关的属性载荷
    #[serde(rename = "Properties", alias = "properties", default)]
    pub properties: serde_json::Value,
}

impl ContentObject {
    pub fn kind(&self) -> ContentKind {
        ContentKind::from_type_tag(&self.type_tag)
    }
}

// ==========================================
// ObjectRef - 结构化对象引用
// ==========================================
/// 形如 `CarSettingOverrideFloat'CarSetupVariantsSurface_1:CarSettingOverrideFloat_4'`
/// 的引用解析结果
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// 最后一个路径分隔符之前的部分
    pub owner_path: String,
    /// 目标对象名
    pub object_name: String,
}

impl ObjectRef {
    /// 解析引用字符串
    ///
    /// # 规则
    /// 1. 去掉类名前缀和引号: `Class'...'` → `...`
    /// 2. 以最后一个 `:` / `.` / `/` 切分: 前段为 owner_path，后段为 object_name
    ///
    /// # 返回
    /// - None: 目标对象名为空
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_matches('"');

        let inner = match (trimmed.find('\''), trimmed.rfind('\'')) {
            (Some(first), Some(last)) if last > first => &trimmed[first + 1..last],
            (Some(first), _) => &trimmed[first + 1..],
            _ => trimmed,
        };

        let (owner_path, object_name) = match inner.rfind(PATH_SEPARATORS) {
            Some(idx) => (&inner[..idx], &inner[idx + 1..]),
            None => ("", inner),
        };

        let object_name = object_name.trim();
        if object_name.is_empty() {
            return None;
        }

        Some(Self {
            owner_path: owner_path.trim().to_string(),
            object_name: object_name.to_string(),
        })
    }

    /// owner_path 的最后一段（通常是路面变体名）
    pub fn owner_name(&self) -> &str {
        self.owner_path
            .rsplit(PATH_SEPARATORS)
            .next()
            .unwrap_or("")
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.owner_path.is_empty() {
            write!(f, "{}", self.object_name)
        } else {
            write!(f, "{}:{}", self.owner_path, self.object_name)
        }
    }
}

// ==========================================
// OverrideEntry / SurfaceVariant - 路面变体
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideEntry {
    /// 点分参数路径，如 Suspensions.FrontLeft.SpringStiffness
    pub key: String,
    pub reference: ObjectRef,
}

/// CarSetupVariantsSurface 对象的类型化视图（保持 ValuesOverrides 原顺序）
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceVariant {
    pub name: String,
    pub overrides: Vec<OverrideEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ref_parse_quoted() {
        let r = ObjectRef::parse(
            "CarSettingOverrideFloat'CarSetupVariantsSurface_1:CarSettingOverrideFloat_4'",
        )
        .unwrap();
        assert_eq!(r.owner_path, "CarSetupVariantsSurface_1");
        assert_eq!(r.object_name, "CarSettingOverrideFloat_4");
        assert_eq!(r.owner_name(), "CarSetupVariantsSurface_1");
    }

    #[test]
    fn test_object_ref_parse_full_path() {
        let r = ObjectRef::parse(
            "CarSettingOverrideFloat'/Game/Cars/Delta/DA_Delta.DA_Delta:CarSetupVariantsSurface_0.CarSettingOverrideFloat_2'",
        )
        .unwrap();
        assert_eq!(r.object_name, "CarSettingOverrideFloat_2");
        assert_eq!(r.owner_name(), "CarSetupVariantsSurface_0");
    }

    #[test]
    fn test_object_ref_parse_bare_name() {
        let r = ObjectRef::parse("CarSettingOverrideInteger_0").unwrap();
        assert_eq!(r.owner_path, "");
        assert_eq!(r.object_name, "CarSettingOverrideInteger_0");
    }

    #[test]
    fn test_object_ref_parse_empty_name() {
        assert!(ObjectRef::parse("CarSettingOverrideFloat'CarSetupVariantsSurface_1:'").is_none());
        assert!(ObjectRef::parse("   ").is_none());
    }

    #[test]
    fn test_content_object_accepts_lowercase_fields() {
        let obj: ContentObject = serde_json::from_str(
            r#"{"type": "CarSettingOverrideFloat", "name": "A", "outer": "V", "properties": {"value": 1.5}}"#,
        )
        .unwrap();
        assert_eq!(obj.kind(), ContentKind::OverrideFloat);
        assert_eq!(obj.outer.as_deref(), Some("V"));
    }
}
