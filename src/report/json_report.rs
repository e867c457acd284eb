// ==========================================
// ACR 调校提取工具 - 结构化报告（JSON）
// ==========================================
// 格式: { 车辆显示名: {driveType, tarmac, gravel, tarmacChanges, gravelChanges} }
// 所有映射有序，输出字节稳定
// ==========================================

use crate::domain::car_report::SetupReport;
use crate::report::error::ReportResult;

/// 渲染为缩进 JSON（末尾换行）
pub fn render_json(report: &SetupReport) -> ReportResult<String> {
    let mut text = serde_json::to_string_pretty(report)?;
    text.push('\n');
    Ok(text)
}
