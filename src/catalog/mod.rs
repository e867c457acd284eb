// ==========================================
// ACR 调校提取工具 - 调校目录
// ==========================================
// 职责: 只读查询（车辆/赛段元数据 + 导出的调校表）
// 数据: cars.tsv / stages.tsv / car_setups_<surface>.tsv
// ==========================================

pub mod setup_catalog;

pub use setup_catalog::{CatalogSetup, SetupCatalog, CARS_FILE, STAGES_FILE};
