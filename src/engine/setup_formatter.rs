// ==========================================
// ACR 调校提取工具 - 调校格式化器
// ==========================================
// 职责: 工程单位原始值 → 展示字符串
// 单位规则:
// - 车身高度: m×1000，一位小数，" mm"
// - 前束: 原值为 0 → "0°"，否则弧度转角度，三位小数
// - 外倾: 原值 + "°"; 胎压: 原值 + " PSI"
// - 制动分配: round(v×100) + "% front"; 前轴扭矩分配: round(v×100) + "%"
// - 弹簧/防倾杆: 原值 + " N/m"; LSD 预载: 原值 + " Nm"
// - 其他: 原值
// 红线: 基准格式化与覆写合并走同一写入路径，保证单位一致
// ==========================================

use crate::domain::setting::{SettingMap, SettingValue};
use crate::domain::setup::{CarSetup, SetupField};
use crate::domain::types::{DiffParam, DriveType};
use crate::engine::key_classifier::{classify, KeyClass};
use std::f64::consts::PI;
use tracing::debug;

/// 单个参数写入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// 已写入调校字段
    Applied(SetupField),
    /// 键无法分类（仅保留在原始集合中）
    Unclassified,
    /// 字段需要数值但给的是行标识
    Unconvertible(SetupField),
    /// 当前驱动形式下该字段不存在
    MissingSection(SetupField),
}

/// 目标字段 + 原始值 → 展示字符串
///
/// # 返回
/// - None: 需要数值换算但值为行标识
pub fn display_value(field: SetupField, value: &SettingValue) -> Option<String> {
    let text = match field {
        SetupField::RideHeight(_) => format!("{:.1} mm", value.as_f64()? * 1000.0),
        SetupField::Toe(_) => {
            let radians = value.as_f64()?;
            if radians == 0.0 {
                "0°".to_string()
            } else {
                format!("{:.3}°", radians * 180.0 / PI)
            }
        }
        SetupField::Camber(_) => format!("{}°", numeric(value)?),
        SetupField::Pressure(_) => format!("{} PSI", numeric(value)?),
        SetupField::BrakeBias => format!("{}% front", percent(value.as_f64()?)),
        SetupField::FrontTorqueBias => format!("{}%", percent(value.as_f64()?)),
        SetupField::Spring(_) | SetupField::FrontArb | SetupField::RearArb => {
            format!("{} N/m", numeric(value)?)
        }
        SetupField::Diff(_, DiffParam::LsdPreload) => format!("{} Nm", numeric(value)?),
        _ => value.to_string(),
    };
    Some(text)
}

// 带单位字段只接受数值
fn numeric(value: &SettingValue) -> Option<&SettingValue> {
    match value {
        SettingValue::DbReference(_) => None,
        _ => Some(value),
    }
}

// 四舍五入（远离零）
fn percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

/// 将单个点分参数写入调校
pub fn apply(setup: &mut CarSetup, key: &str, value: &SettingValue) -> ApplyOutcome {
    let field = match classify(key) {
        KeyClass::Field(f) => f,
        KeyClass::Other => return ApplyOutcome::Unclassified,
    };

    let display = match display_value(field, value) {
        Some(text) => text,
        None => {
            debug!(key, kind = %value.kind(), "字段需要数值，行标识值已丢弃");
            return ApplyOutcome::Unconvertible(field);
        }
    };

    if setup.set(field, display) {
        ApplyOutcome::Applied(field)
    } else {
        debug!(key, drive_type = %setup.drive_type, "驱动形式不含该字段，已丢弃");
        ApplyOutcome::MissingSection(field)
    }
}

/// 基准参数 → 展示用基准调校
///
/// 空骨架（按驱动形式）+ 逐项写入基准参数
pub fn format_baseline(drive_type: DriveType, params: &SettingMap) -> CarSetup {
    let mut setup = CarSetup::skeleton(drive_type);
    for (key, value) in params.iter() {
        apply(&mut setup, key, value);
    }
    setup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Axle, Corner};

    fn float(v: f64) -> SettingValue {
        SettingValue::Float(v)
    }

    #[test]
    fn test_toe_conversion() {
        assert_eq!(
            display_value(SetupField::Toe(Corner::FL), &float(0.03490659)).as_deref(),
            Some("2.000°")
        );
        assert_eq!(
            display_value(SetupField::Toe(Corner::FL), &float(0.0)).as_deref(),
            Some("0°")
        );
        assert_eq!(
            display_value(SetupField::Toe(Corner::RR), &SettingValue::Integer(0)).as_deref(),
            Some("0°")
        );
    }

    #[test]
    fn test_ride_height_and_biases() {
        assert_eq!(
            display_value(SetupField::RideHeight(Corner::RL), &float(0.085)).as_deref(),
            Some("85.0 mm")
        );
        assert_eq!(
            display_value(SetupField::BrakeBias, &float(0.63)).as_deref(),
            Some("63% front")
        );
        assert_eq!(
            display_value(SetupField::FrontTorqueBias, &float(0.375)).as_deref(),
            Some("38%")
        );
    }

    #[test]
    fn test_verbatim_and_suffix_units() {
        assert_eq!(
            display_value(SetupField::Spring(Corner::FL), &SettingValue::Integer(45000)).as_deref(),
            Some("45000 N/m")
        );
        assert_eq!(
            display_value(SetupField::Spring(Corner::FL), &float(45000.0)).as_deref(),
            Some("45000 N/m")
        );
        assert_eq!(
            display_value(SetupField::Camber(Corner::FR), &float(-2.4)).as_deref(),
            Some("-2.4°")
        );
        assert_eq!(
            display_value(SetupField::Pressure(Corner::FR), &float(26.5)).as_deref(),
            Some("26.5 PSI")
        );
        assert_eq!(
            display_value(SetupField::Diff(Axle::Rear, DiffParam::LsdPreload), &float(90.0))
                .as_deref(),
            Some("90 Nm")
        );
        assert_eq!(
            display_value(SetupField::Diff(Axle::Rear, DiffParam::LsdRampAngle), &float(45.0))
                .as_deref(),
            Some("45")
        );
        assert_eq!(
            display_value(
                SetupField::GearsSet,
                &SettingValue::DbReference("GravelShort".to_string())
            )
            .as_deref(),
            Some("GravelShort")
        );
    }

    #[test]
    fn test_db_reference_dropped_for_numeric_conversions() {
        let row = SettingValue::DbReference("Row".to_string());
        assert!(display_value(SetupField::RideHeight(Corner::FL), &row).is_none());
        assert!(display_value(SetupField::Toe(Corner::FL), &row).is_none());
        assert!(display_value(SetupField::BrakeBias, &row).is_none());
        assert!(display_value(SetupField::Spring(Corner::FL), &row).is_none());
        assert!(display_value(SetupField::Pressure(Corner::RR), &row).is_none());
        assert!(display_value(SetupField::Camber(Corner::FL), &row).is_none());
        assert!(display_value(SetupField::RearArb, &row).is_none());
        assert!(
            display_value(SetupField::Diff(Axle::Front, DiffParam::LsdPreload), &row).is_none()
        );
        // 无单位字段原样保留行标识
        assert_eq!(
            display_value(SetupField::Diff(Axle::Front, DiffParam::LsdRampAngle), &row).as_deref(),
            Some("Row")
        );
    }

    #[test]
    fn test_format_baseline_respects_drive_type() {
        let mut params = SettingMap::new();
        params.insert("Differentials.Front.LSDPreload", float(60.0));
        params.insert("Differentials.Rear.LSDPreload", float(90.0));
        params.insert("Differentials.Centre.CentreDifferentialRatio", float(1.0));
        params.insert("Engine.Main.Rpm", float(7000.0));

        let setup = format_baseline(DriveType::Rwd, &params);
        assert!(setup.drivetrain.front_diff.is_none());
        assert!(setup.drivetrain.centre_diff_ratio.is_none());
        assert_eq!(
            setup.get(SetupField::Diff(Axle::Rear, DiffParam::LsdPreload)),
            Some("90 Nm")
        );
    }

    #[test]
    fn test_apply_outcomes() {
        let mut setup = CarSetup::skeleton(DriveType::Fwd);
        assert_eq!(
            apply(&mut setup, "Axles.Front.ARBStiffness", &float(12000.0)),
            ApplyOutcome::Applied(SetupField::FrontArb)
        );
        assert_eq!(
            apply(&mut setup, "Aero.Rear.Wing", &float(1.0)),
            ApplyOutcome::Unclassified
        );
        assert_eq!(
            apply(&mut setup, "Differentials.Centre.CentreDifferentialRatio", &float(1.0)),
            ApplyOutcome::MissingSection(SetupField::CentreDiffRatio)
        );
        assert_eq!(
            apply(
                &mut setup,
                "Brakes.BrakesMain.FrontBias",
                &SettingValue::DbReference("X".to_string())
            ),
            ApplyOutcome::Unconvertible(SetupField::BrakeBias)
        );
    }
}
