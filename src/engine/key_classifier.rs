// ==========================================
// ACR 调校提取工具 - 覆写键分类器
// ==========================================
// 规则: 键必须恰好三段（点分），区分大小写
//       不认识的键归为 Other（保留在原始覆写集合中，不影响调校字段）
// ==========================================

use crate::domain::setup::SetupField;
use crate::domain::types::{Axle, Corner, DamperParam, DiffParam, KeyCategory};

/// 分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Field(SetupField),
    Other,
}

impl KeyClass {
    pub fn field(self) -> Option<SetupField> {
        match self {
            KeyClass::Field(f) => Some(f),
            KeyClass::Other => None,
        }
    }
}

/// 点分键 → 调校目标字段
pub fn classify(key: &str) -> KeyClass {
    let segments: Vec<&str> = key.split('.').collect();
    let (group, sub, leaf) = match segments.as_slice() {
        [group, sub, leaf] => (*group, *sub, *leaf),
        _ => return KeyClass::Other,
    };

    let field = match group {
        "Suspensions" => {
            let corner = Corner::from_wheel_token(sub);
            match leaf {
                "SpringStiffness" => corner.map(SetupField::Spring),
                "AdjusterRing" => corner.map(SetupField::RideHeight),
                _ => None,
            }
        }
        "Axles" => match (Axle::from_token(sub), leaf) {
            (Some(Axle::Front), "ARBStiffness") => Some(SetupField::FrontArb),
            (Some(Axle::Rear), "ARBStiffness") => Some(SetupField::RearArb),
            _ => None,
        },
        "Wheels" => {
            let corner = Corner::from_wheel_token(sub);
            match leaf {
                "Camber" => corner.map(SetupField::Camber),
                "Toe" => corner.map(SetupField::Toe),
                "Pressure" => corner.map(SetupField::Pressure),
                _ => None,
            }
        }
        "Gearbox" if sub == "GearboxMain" && leaf == "GearsSet" => Some(SetupField::GearsSet),
        "Differentials" => match sub {
            "Centre" => match leaf {
                "CentreDifferentialRatio" => Some(SetupField::CentreDiffRatio),
                "FrontTorqueBias" => Some(SetupField::FrontTorqueBias),
                _ => None,
            },
            _ => Axle::from_token(sub)
                .zip(DiffParam::from_sub_key(leaf))
                .map(|(axle, param)| SetupField::Diff(axle, param)),
        },
        "Dampers" => Corner::from_wheel_token(sub)
            .zip(DamperParam::from_token(leaf))
            .map(|(corner, param)| SetupField::Damper(corner, param)),
        "Brakes" if sub == "BrakesMain" => match leaf {
            "FrontBias" => Some(SetupField::BrakeBias),
            "PropValvePressure" => Some(SetupField::PropValvePressure),
            "HandbrakeMultiplier" => Some(SetupField::HandbrakeMultiplier),
            _ => None,
        },
        _ => None,
    };

    field.map(KeyClass::Field).unwrap_or(KeyClass::Other)
}

/// 点分键 → 粗分类（按首段）
pub fn categorize(key: &str) -> KeyCategory {
    match key.split('.').next().unwrap_or("") {
        "Gearbox" => KeyCategory::Gearing,
        "Suspensions" | "Axles" => KeyCategory::Suspension,
        "Dampers" => KeyCategory::Dampers,
        "Brakes" => KeyCategory::Brakes,
        "Wheels" => KeyCategory::Wheels,
        "Differentials" => KeyCategory::Differential,
        _ => KeyCategory::Other,
    }
}
