// ==========================================
// ACR 调校提取工具 - 车辆/赛段元数据
// ==========================================
// 来源: cars.tsv / stages.tsv（只读）
// ==========================================

use crate::domain::types::Surface;
use serde::Serialize;

/// 车辆元数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarInfo {
    pub name: String,
    pub manufacturer: String,
    pub car_class: String,
    pub drivetrain: String,
    pub notes: String,
}

/// 赛段元数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageInfo {
    pub name: String,
    pub location: String,
    /// 原始 Surface 列（"Gravel" / "Tarmac"）
    pub surface: String,
    pub style: String,
    pub length: String,
    pub notes: String,
}

impl StageInfo {
    pub fn surface_kind(&self) -> Surface {
        Surface::from_stage_surface(&self.surface)
    }
}
