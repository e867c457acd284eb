// ==========================================
// ACR 调校提取工具 - 单车提取结果
// ==========================================
// 用途: 编排器输出，报告渲染器输入
// ==========================================

use crate::domain::setting::OverrideSet;
use crate::domain::setup::CarSetup;
use crate::domain::types::{DriveType, Surface};
use serde::Serialize;
use std::collections::BTreeMap;

// ==========================================
// CarReport - 单车两路面合并结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarReport {
    pub drive_type: DriveType,
    pub tarmac: CarSetup,
    pub gravel: CarSetup,
    /// 柏油路面原始覆写（含未分类键）
    pub tarmac_changes: OverrideSet,
    /// 砂石路面原始覆写（含未分类键）
    pub gravel_changes: OverrideSet,
}

impl CarReport {
    pub fn setup(&self, surface: Surface) -> &CarSetup {
        match surface {
            Surface::Tarmac => &self.tarmac,
            Surface::Gravel => &self.gravel,
        }
    }

    pub fn changes(&self, surface: Surface) -> &OverrideSet {
        match surface {
            Surface::Tarmac => &self.tarmac_changes,
            Surface::Gravel => &self.gravel_changes,
        }
    }
}

/// 车辆显示名 → 提取结果（有序）
pub type SetupReport = BTreeMap<String, CarReport>;
