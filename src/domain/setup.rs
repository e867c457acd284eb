// ==========================================
// ACR 调校提取工具 - 调校结构
// ==========================================
// 职责: 展示用调校结构（Drivetrain/Suspension/Dampers/Tyres/Brakes）
//       + 目标字段寻址（SetupField）
// 红线: 差速器段是否存在由驱动形式决定，写入不存在的段一律拒绝
// ==========================================

use crate::domain::types::{Axle, Corner, DamperParam, DiffParam, DriveType};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// SetupSection - 调校分段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupSection {
    Drivetrain,
    Suspension,
    Dampers,
    Tyres,
    Brakes,
}

impl SetupSection {
    pub const ALL: [SetupSection; 5] = [
        SetupSection::Drivetrain,
        SetupSection::Suspension,
        SetupSection::Dampers,
        SetupSection::Tyres,
        SetupSection::Brakes,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            SetupSection::Drivetrain => "drivetrain",
            SetupSection::Suspension => "suspension",
            SetupSection::Dampers => "dampers",
            SetupSection::Tyres => "tyres",
            SetupSection::Brakes => "brakes",
        }
    }
}

impl fmt::Display for SetupSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name().to_uppercase())
    }
}

// ==========================================
// SetupField - 调校目标字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupField {
    // ===== Drivetrain =====
    GearsSet,
    FrontTorqueBias,
    Diff(Axle, DiffParam),
    CentreDiffRatio,

    // ===== Suspension =====
    FrontArb,
    RearArb,
    Spring(Corner),
    RideHeight(Corner),

    // ===== Dampers =====
    Damper(Corner, DamperParam),

    // ===== Tyres =====
    Pressure(Corner),
    Camber(Corner),
    Toe(Corner),

    // ===== Brakes =====
    BrakeBias,
    PropValvePressure,
    HandbrakeMultiplier,
}

impl SetupField {
    /// 全部字段（输出顺序）
    pub fn all() -> Vec<SetupField> {
        let mut fields = vec![SetupField::GearsSet, SetupField::FrontTorqueBias];
        for axle in [Axle::Front, Axle::Rear] {
            fields.extend(DiffParam::ALL.into_iter().map(|p| SetupField::Diff(axle, p)));
        }
        fields.push(SetupField::CentreDiffRatio);

        fields.push(SetupField::FrontArb);
        fields.push(SetupField::RearArb);
        fields.extend(Corner::ALL.into_iter().map(SetupField::Spring));
        fields.extend(Corner::ALL.into_iter().map(SetupField::RideHeight));

        for corner in Corner::ALL {
            fields.extend(
                DamperParam::ALL
                    .into_iter()
                    .map(|p| SetupField::Damper(corner, p)),
            );
        }

        for corner in Corner::ALL {
            fields.push(SetupField::Pressure(corner));
            fields.push(SetupField::Camber(corner));
            fields.push(SetupField::Toe(corner));
        }

        fields.push(SetupField::BrakeBias);
        fields.push(SetupField::PropValvePressure);
        fields.push(SetupField::HandbrakeMultiplier);
        fields
    }

    pub fn section(&self) -> SetupSection {
        match self {
            SetupField::GearsSet
            | SetupField::FrontTorqueBias
            | SetupField::Diff(..)
            | SetupField::CentreDiffRatio => SetupSection::Drivetrain,
            SetupField::FrontArb
            | SetupField::RearArb
            | SetupField::Spring(_)
            | SetupField::RideHeight(_) => SetupSection::Suspension,
            SetupField::Damper(..) => SetupSection::Dampers,
            SetupField::Pressure(_) | SetupField::Camber(_) | SetupField::Toe(_) => {
                SetupSection::Tyres
            }
            SetupField::BrakeBias
            | SetupField::PropValvePressure
            | SetupField::HandbrakeMultiplier => SetupSection::Brakes,
        }
    }

    /// 段内相对路径，如 `springs.FL` / `frontDiff.lsdPreload`
    pub fn local_path(&self) -> String {
        match self {
            SetupField::GearsSet => "gearsSet".to_string(),
            SetupField::FrontTorqueBias => "frontBias".to_string(),
            SetupField::Diff(axle, param) => {
                format!("{}.{}", axle.diff_field(), param.field_name())
            }
            SetupField::CentreDiffRatio => "centreDiffRatio".to_string(),
            SetupField::FrontArb => "frontARB".to_string(),
            SetupField::RearArb => "rearARB".to_string(),
            SetupField::Spring(c) => format!("springs.{}", c),
            SetupField::RideHeight(c) => format!("rideHeight.{}", c),
            SetupField::Damper(c, p) => format!("{}.{}", c, p.field_name()),
            SetupField::Pressure(c) => format!("{}.pressure", c),
            SetupField::Camber(c) => format!("{}.camber", c),
            SetupField::Toe(c) => format!("{}.toe", c),
            SetupField::BrakeBias => "brakeBias".to_string(),
            SetupField::PropValvePressure => "propValvePressure".to_string(),
            SetupField::HandbrakeMultiplier => "handbrakeMultiplier".to_string(),
        }
    }

    /// 完整路径，如 `suspension.springs.FL`（与 TSV 的 path 列一致）
    pub fn path(&self) -> String {
        format!("{}.{}", self.section().field_name(), self.local_path())
    }

    /// 由完整路径反查字段
    pub fn from_path(path: &str) -> Option<SetupField> {
        SetupField::all().into_iter().find(|f| f.path() == path)
    }
}

// ==========================================
// 各段结构
// ==========================================

/// 差速器设置
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsd_ramp_angle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsd_preload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsd_plates: Option<String>,
}

impl DiffSettings {
    fn slot(&mut self, param: DiffParam) -> &mut Option<String> {
        match param {
            DiffParam::Ratio => &mut self.ratio,
            DiffParam::LsdRampAngle => &mut self.lsd_ramp_angle,
            DiffParam::LsdPreload => &mut self.lsd_preload,
            DiffParam::LsdPlates => &mut self.lsd_plates,
        }
    }

    fn value(&self, param: DiffParam) -> Option<&str> {
        match param {
            DiffParam::Ratio => self.ratio.as_deref(),
            DiffParam::LsdRampAngle => self.lsd_ramp_angle.as_deref(),
            DiffParam::LsdPreload => self.lsd_preload.as_deref(),
            DiffParam::LsdPlates => self.lsd_plates.as_deref(),
        }
    }
}

/// 传动段（差速器字段按驱动形式存在）
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivetrainSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gears_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_bias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_diff: Option<DiffSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_diff: Option<DiffSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centre_diff_ratio: Option<String>,
}

/// 悬挂段
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SuspensionSection {
    #[serde(rename = "frontARB", skip_serializing_if = "Option::is_none")]
    pub front_arb: Option<String>,
    #[serde(rename = "rearARB", skip_serializing_if = "Option::is_none")]
    pub rear_arb: Option<String>,
    pub springs: BTreeMap<Corner, String>,
    #[serde(rename = "rideHeight")]
    pub ride_height: BTreeMap<Corner, String>,
}

/// 单轮减振器设置
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DamperSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_bump: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_rebound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_bump: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_rebound: Option<String>,
}

impl DamperSettings {
    fn slot(&mut self, param: DamperParam) -> &mut Option<String> {
        match param {
            DamperParam::SlowBump => &mut self.slow_bump,
            DamperParam::SlowRebound => &mut self.slow_rebound,
            DamperParam::FastBump => &mut self.fast_bump,
            DamperParam::FastRebound => &mut self.fast_rebound,
        }
    }

    fn value(&self, param: DamperParam) -> Option<&str> {
        match param {
            DamperParam::SlowBump => self.slow_bump.as_deref(),
            DamperParam::SlowRebound => self.slow_rebound.as_deref(),
            DamperParam::FastBump => self.fast_bump.as_deref(),
            DamperParam::FastRebound => self.fast_rebound.as_deref(),
        }
    }
}

/// 单轮轮胎/定位设置
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TyreSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toe: Option<String>,
}

/// 制动段
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrakesSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brake_bias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prop_valve_pressure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handbrake_multiplier: Option<String>,
}

// ==========================================
// CarSetup - 单车单路面完整调校
// ==========================================
// 基准调校与合并结果共用此结构
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarSetup {
    /// 驱动形式（车辆级字段，不随调校序列化）
    #[serde(skip)]
    pub drive_type: DriveType,
    pub drivetrain: DrivetrainSection,
    pub suspension: SuspensionSection,
    pub dampers: BTreeMap<Corner, DamperSettings>,
    pub tyres: BTreeMap<Corner, TyreSettings>,
    pub brakes: BrakesSection,
}

impl CarSetup {
    /// 按驱动形式创建空骨架
    ///
    /// # 规则
    /// - frontDiff: 仅 FWD/AWD
    /// - rearDiff: 仅 RWD/AWD
    pub fn skeleton(drive_type: DriveType) -> Self {
        Self {
            drive_type,
            drivetrain: DrivetrainSection {
                front_diff: drive_type.has_front_diff().then(DiffSettings::default),
                rear_diff: drive_type.has_rear_diff().then(DiffSettings::default),
                ..Default::default()
            },
            suspension: SuspensionSection::default(),
            dampers: BTreeMap::new(),
            tyres: BTreeMap::new(),
            brakes: BrakesSection::default(),
        }
    }

    /// 写入展示值（绝对写入，非增量）
    ///
    /// # 返回
    /// - true: 写入成功
    /// - false: 目标字段在当前驱动形式下不存在，丢弃
    pub fn set(&mut self, field: SetupField, display: String) -> bool {
        match field {
            SetupField::GearsSet => self.drivetrain.gears_set = Some(display),
            SetupField::FrontTorqueBias => {
                if !self.drive_type.has_centre_diff() {
                    return false;
                }
                self.drivetrain.front_bias = Some(display);
            }
            SetupField::Diff(axle, param) => {
                let diff = match axle {
                    Axle::Front => self.drivetrain.front_diff.as_mut(),
                    Axle::Rear => self.drivetrain.rear_diff.as_mut(),
                };
                match diff {
                    Some(d) => *d.slot(param) = Some(display),
                    None => return false,
                }
            }
            SetupField::CentreDiffRatio => {
                if !self.drive_type.has_centre_diff() {
                    return false;
                }
                self.drivetrain.centre_diff_ratio = Some(display);
            }
            SetupField::FrontArb => self.suspension.front_arb = Some(display),
            SetupField::RearArb => self.suspension.rear_arb = Some(display),
            SetupField::Spring(c) => {
                self.suspension.springs.insert(c, display);
            }
            SetupField::RideHeight(c) => {
                self.suspension.ride_height.insert(c, display);
            }
            SetupField::Damper(c, param) => {
                *self.dampers.entry(c).or_default().slot(param) = Some(display);
            }
            SetupField::Pressure(c) => self.tyres.entry(c).or_default().pressure = Some(display),
            SetupField::Camber(c) => self.tyres.entry(c).or_default().camber = Some(display),
            SetupField::Toe(c) => self.tyres.entry(c).or_default().toe = Some(display),
            SetupField::BrakeBias => self.brakes.brake_bias = Some(display),
            SetupField::PropValvePressure => self.brakes.prop_valve_pressure = Some(display),
            SetupField::HandbrakeMultiplier => self.brakes.handbrake_multiplier = Some(display),
        }
        true
    }

    /// 原样写入，不受驱动形式约束（缺失的差速器段按需创建）
    pub fn set_as_given(&mut self, field: SetupField, display: String) {
        match field {
            SetupField::FrontTorqueBias => self.drivetrain.front_bias = Some(display),
            SetupField::CentreDiffRatio => self.drivetrain.centre_diff_ratio = Some(display),
            SetupField::Diff(axle, param) => {
                let diff = match axle {
                    Axle::Front => &mut self.drivetrain.front_diff,
                    Axle::Rear => &mut self.drivetrain.rear_diff,
                };
                *diff.get_or_insert_with(DiffSettings::default).slot(param) = Some(display);
            }
            _ => {
                self.set(field, display);
            }
        }
    }

    /// 读取展示值
    pub fn get(&self, field: SetupField) -> Option<&str> {
        match field {
            SetupField::GearsSet => self.drivetrain.gears_set.as_deref(),
            SetupField::FrontTorqueBias => self.drivetrain.front_bias.as_deref(),
            SetupField::Diff(axle, param) => {
                let diff = match axle {
                    Axle::Front => self.drivetrain.front_diff.as_ref(),
                    Axle::Rear => self.drivetrain.rear_diff.as_ref(),
                };
                diff.and_then(|d| d.value(param))
            }
            SetupField::CentreDiffRatio => self.drivetrain.centre_diff_ratio.as_deref(),
            SetupField::FrontArb => self.suspension.front_arb.as_deref(),
            SetupField::RearArb => self.suspension.rear_arb.as_deref(),
            SetupField::Spring(c) => self.suspension.springs.get(&c).map(String::as_str),
            SetupField::RideHeight(c) => self.suspension.ride_height.get(&c).map(String::as_str),
            SetupField::Damper(c, param) => self.dampers.get(&c).and_then(|d| d.value(param)),
            SetupField::Pressure(c) => self.tyres.get(&c).and_then(|t| t.pressure.as_deref()),
            SetupField::Camber(c) => self.tyres.get(&c).and_then(|t| t.camber.as_deref()),
            SetupField::Toe(c) => self.tyres.get(&c).and_then(|t| t.toe.as_deref()),
            SetupField::BrakeBias => self.brakes.brake_bias.as_deref(),
            SetupField::PropValvePressure => self.brakes.prop_valve_pressure.as_deref(),
            SetupField::HandbrakeMultiplier => self.brakes.handbrake_multiplier.as_deref(),
        }
    }

    /// 已填充字段（输出顺序）
    pub fn populated_fields(&self) -> Vec<(SetupField, &str)> {
        SetupField::all()
            .into_iter()
            .filter_map(|f| self.get(f).map(|v| (f, v)))
            .collect()
    }
}
