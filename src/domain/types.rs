// ==========================================
// ACR 调校提取工具 - 领域类型定义
// ==========================================
// 依据: ACR 内容导出格式 - 车轮/车轴/差速器命名
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 驱动形式 (Drive Type)
// ==========================================
// 决定 Drivetrain 段中哪些差速器字段存在
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DriveType {
    Fwd, // 前驱
    Rwd, // 后驱
    Awd, // 四驱
}

impl fmt::Display for DriveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveType::Fwd => write!(f, "FWD"),
            DriveType::Rwd => write!(f, "RWD"),
            DriveType::Awd => write!(f, "AWD"),
        }
    }
}

impl DriveType {
    /// 从内容字符串解析驱动形式
    ///
    /// 支持 "AWD" / "4WD" / "EDrivetrainType::RWD" 等写法，大小写不敏感
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_uppercase();
        let token = upper.rsplit("::").next().unwrap_or("");
        match token {
            "FWD" => Some(DriveType::Fwd),
            "RWD" => Some(DriveType::Rwd),
            "AWD" | "4WD" => Some(DriveType::Awd),
            _ => None,
        }
    }

    /// 由差速器段是否存在反推驱动形式
    ///
    /// # 规则
    /// - 有中央差速器，或前后差速器同时存在 → AWD
    /// - 仅前差速器 → FWD
    /// - 其他 → RWD
    pub fn infer(has_front: bool, has_rear: bool, has_centre: bool) -> Self {
        if has_centre || (has_front && has_rear) {
            DriveType::Awd
        } else if has_front {
            DriveType::Fwd
        } else {
            DriveType::Rwd
        }
    }

    pub fn has_front_diff(&self) -> bool {
        matches!(self, DriveType::Fwd | DriveType::Awd)
    }

    pub fn has_rear_diff(&self) -> bool {
        matches!(self, DriveType::Rwd | DriveType::Awd)
    }

    pub fn has_centre_diff(&self) -> bool {
        matches!(self, DriveType::Awd)
    }
}

// ==========================================
// 路面 (Surface)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Tarmac, // 柏油
    Gravel, // 砂石
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::Tarmac, Surface::Gravel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Tarmac => "tarmac",
            Surface::Gravel => "gravel",
        }
    }

    /// 从赛段表的 Surface 列解析（非 gravel 一律按 tarmac 处理）
    pub fn from_stage_surface(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("gravel") {
            Surface::Gravel
        } else {
            Surface::Tarmac
        }
    }
}

// ==========================================
// 车轮位置 (Corner)
// ==========================================
// 内容键中的 FrontLeft/FrontRight/RearLeft/RearRight → FL/FR/RL/RR
// 声明顺序即输出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Corner {
    FL,
    FR,
    RL,
    RR,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::FL, Corner::FR, Corner::RL, Corner::RR];

    /// 内容键中的车轮标记（区分大小写）
    pub fn from_wheel_token(token: &str) -> Option<Self> {
        match token {
            "FrontLeft" => Some(Corner::FL),
            "FrontRight" => Some(Corner::FR),
            "RearLeft" => Some(Corner::RL),
            "RearRight" => Some(Corner::RR),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Corner::FL => "FL",
            Corner::FR => "FR",
            Corner::RL => "RL",
            Corner::RR => "RR",
        }
    }
}

// ==========================================
// 车轴 (Axle)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axle {
    Front,
    Rear,
}

impl Axle {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Front" => Some(Axle::Front),
            "Rear" => Some(Axle::Rear),
            _ => None,
        }
    }

    /// 输出结构中的差速器字段名
    pub fn diff_field(&self) -> &'static str {
        match self {
            Axle::Front => "frontDiff",
            Axle::Rear => "rearDiff",
        }
    }
}

// ==========================================
// 差速器参数 (Differential Parameter)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffParam {
    Ratio,        // 主减速比
    LsdRampAngle, // LSD 坡道角
    LsdPreload,   // LSD 预载
    LsdPlates,    // LSD 摩擦片数
}

impl DiffParam {
    pub const ALL: [DiffParam; 4] = [
        DiffParam::Ratio,
        DiffParam::LsdRampAngle,
        DiffParam::LsdPreload,
        DiffParam::LsdPlates,
    ];

    pub fn from_sub_key(sub_key: &str) -> Option<Self> {
        match sub_key {
            "DifferentialRatio" => Some(DiffParam::Ratio),
            "LSDRamps" => Some(DiffParam::LsdRampAngle),
            "LSDPreload" => Some(DiffParam::LsdPreload),
            "LSDFrictionPlates" => Some(DiffParam::LsdPlates),
            _ => None,
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            DiffParam::Ratio => "ratio",
            DiffParam::LsdRampAngle => "lsdRampAngle",
            DiffParam::LsdPreload => "lsdPreload",
            DiffParam::LsdPlates => "lsdPlates",
        }
    }
}

// ==========================================
// 减振器参数 (Damper Parameter)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamperParam {
    SlowBump,
    SlowRebound,
    FastBump,
    FastRebound,
}

impl DamperParam {
    pub const ALL: [DamperParam; 4] = [
        DamperParam::SlowBump,
        DamperParam::SlowRebound,
        DamperParam::FastBump,
        DamperParam::FastRebound,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "SlowBump" => Some(DamperParam::SlowBump),
            "SlowRebound" => Some(DamperParam::SlowRebound),
            "FastBump" => Some(DamperParam::FastBump),
            "FastRebound" => Some(DamperParam::FastRebound),
            _ => None,
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            DamperParam::SlowBump => "slowBump",
            DamperParam::SlowRebound => "slowRebound",
            DamperParam::FastBump => "fastBump",
            DamperParam::FastRebound => "fastRebound",
        }
    }
}

// ==========================================
// 覆写键粗分类 (Key Category)
// ==========================================
// 仅用于分组展示，不参与合并
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCategory {
    Gearing,
    Suspension,
    Dampers,
    Brakes,
    Wheels,
    Differential,
    Other,
}

impl fmt::Display for KeyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCategory::Gearing => write!(f, "gearing"),
            KeyCategory::Suspension => write!(f, "suspension"),
            KeyCategory::Dampers => write!(f, "dampers"),
            KeyCategory::Brakes => write!(f, "brakes"),
            KeyCategory::Wheels => write!(f, "wheels"),
            KeyCategory::Differential => write!(f, "differential"),
            KeyCategory::Other => write!(f, "other"),
        }
    }
}
