// ==========================================
// ACR 调校提取工具 - 内容映射器
// ==========================================
// 依据: FModel/CUE4Parse JSON 导出格式
// 职责: 内容对象属性 → 类型化视图
//       (路面变体覆写列表 / 基准参数展开 / 驱动形式)
// ==========================================

use crate::domain::content::{ContentKind, ContentObject, ObjectRef, OverrideEntry, SurfaceVariant};
use crate::domain::setting::{SettingMap, SettingValue};
use crate::domain::types::DriveType;
use serde_json::{Map, Value};

// 属性名别名（导出工具版本不同，大小写不一）
const VALUES_OVERRIDES_KEYS: &[&str] = &["ValuesOverrides", "valuesOverrides", "values_overrides"];
const ENTRY_KEY_KEYS: &[&str] = &["Key", "key"];
const ENTRY_VALUE_KEYS: &[&str] = &["Value", "value"];
const OBJECT_NAME_KEYS: &[&str] = &["ObjectName", "objectName"];
const ROW_KEYS: &[&str] = &["RowName", "Row", "row"];
const DRIVE_TYPE_KEYS: &[&str] = &["DriveType", "DrivetrainType", "Drivetrain"];

pub struct ContentMapper;

impl ContentMapper {
    /// CarSetupVariantsSurface 对象 → SurfaceVariant
    ///
    /// # 规则
    /// - ValuesOverrides 为数组: [{Key, Value}]，Value 为字符串或 {ObjectName}
    /// - ValuesOverrides 为对象: {key: ref}
    /// - 引用无法解析的条目丢弃
    ///
    /// # 返回
    /// - None: 对象不是路面变体
    pub fn surface_variant(&self, object: &ContentObject) -> Option<SurfaceVariant> {
        if object.kind() != ContentKind::SurfaceVariant {
            return None;
        }

        let mut overrides = Vec::new();
        match lookup(&object.properties, VALUES_OVERRIDES_KEYS) {
            Some(Value::Array(entries)) => {
                for entry in entries {
                    let key = lookup(entry, ENTRY_KEY_KEYS).and_then(Value::as_str);
                    let reference = lookup(entry, ENTRY_VALUE_KEYS).and_then(reference_text);
                    self.push_entry(&mut overrides, &object.name, key, reference);
                }
            }
            Some(Value::Object(map)) => {
                for (key, value) in map {
                    self.push_entry(
                        &mut overrides,
                        &object.name,
                        Some(key.as_str()),
                        reference_text(value),
                    );
                }
            }
            Some(_) => {
                tracing::debug!("路面变体 {} 的 ValuesOverrides 结构无法识别", object.name);
            }
            None => {}
        }

        Some(SurfaceVariant {
            name: object.name.clone(),
            overrides,
        })
    }

    fn push_entry(
        &self,
        overrides: &mut Vec<OverrideEntry>,
        variant_name: &str,
        key: Option<&str>,
        reference: Option<&str>,
    ) {
        let key = match key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(k) => k,
            None => {
                tracing::debug!("路面变体 {} 存在缺少 Key 的覆写条目，已跳过", variant_name);
                return;
            }
        };

        match reference.and_then(ObjectRef::parse) {
            Some(reference) => overrides.push(OverrideEntry {
                key: key.to_string(),
                reference,
            }),
            None => tracing::debug!(
                "路面变体 {} 覆写 {} 的引用无法解析，已跳过",
                variant_name,
                key
            ),
        }
    }

    /// PhysicsCarSetup 属性 → 点分路径参数表
    ///
    /// # 规则
    /// - 数值叶子: 整数 → Integer，其他 → Float
    /// - 含 RowName/Row/row 字符串的对象: DbReference
    /// - 字符串/布尔/数组叶子忽略（驱动形式单独读取）
    pub fn baseline_params(&self, object: &ContentObject) -> SettingMap {
        let mut params = SettingMap::new();
        if let Value::Object(map) = &object.properties {
            flatten_into(&mut params, "", map);
        }
        params
    }

    /// 读取驱动形式，缺失时按差速器段反推
    pub fn drive_type(&self, object: &ContentObject, params: &SettingMap) -> DriveType {
        let declared = DRIVE_TYPE_KEYS
            .iter()
            .filter_map(|k| object.properties.get(*k))
            .filter_map(Value::as_str)
            .find_map(DriveType::parse);

        match declared {
            Some(drive) => drive,
            None => {
                let inferred = DriveType::infer(
                    params.has_prefix("Differentials.Front."),
                    params.has_prefix("Differentials.Rear."),
                    params.has_prefix("Differentials.Centre."),
                );
                tracing::debug!("{} 未声明驱动形式，按差速器段推断为 {}", object.name, inferred);
                inferred
            }
        }
    }

    /// 读取覆写对象的 value 字段原始值
    pub fn override_value<'a>(&self, object: &'a ContentObject) -> Option<&'a Value> {
        lookup(&object.properties, ENTRY_VALUE_KEYS)
    }

    /// 参数表行标识（{RowName: "..."}）
    pub fn row_name<'a>(&self, value: &'a Value) -> Option<&'a str> {
        row_name(value)
    }
}

/// 按别名依次查找属性
fn lookup<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| value.get(*k))
}

/// 引用字段文本: 字符串本身，或 {ObjectName: "..."}
fn reference_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(_) => lookup(value, OBJECT_NAME_KEYS).and_then(Value::as_str),
        _ => None,
    }
}

fn row_name(value: &Value) -> Option<&str> {
    match value {
        Value::Object(_) => lookup(value, ROW_KEYS)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}

fn flatten_into(params: &mut SettingMap, prefix: &str, map: &Map<String, Value>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        if let Some(row) = row_name(value) {
            params.insert(path, SettingValue::DbReference(row.to_string()));
            continue;
        }

        match value {
            Value::Object(child) => flatten_into(params, &path, child),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    params.insert(path, SettingValue::Integer(i));
                } else if let Some(f) = n.as_f64() {
                    params.insert(path, SettingValue::Float(f));
                }
            }
            _ => {}
        }
    }
}
