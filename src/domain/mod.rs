// ==========================================
// ACR 调校提取工具 - 领域模型层
// ==========================================
// 职责: 定义内容对象、参数值、调校结构、报告实体
// 红线: 不含文件访问逻辑，不含引擎逻辑
// ==========================================

pub mod car_report;
pub mod catalog;
pub mod content;
pub mod setting;
pub mod setup;
pub mod types;

// 重导出核心类型
pub use car_report::{CarReport, SetupReport};
pub use catalog::{CarInfo, StageInfo};
pub use content::{ContentKind, ContentObject, ObjectRef, OverrideEntry, SurfaceVariant};
pub use setting::{OverrideSet, SettingKind, SettingMap, SettingValue};
pub use setup::{
    BrakesSection, CarSetup, DamperSettings, DiffSettings, DrivetrainSection, SetupField,
    SetupSection, SuspensionSection, TyreSettings,
};
pub use types::{Axle, Corner, DamperParam, DiffParam, DriveType, KeyCategory, Surface};
