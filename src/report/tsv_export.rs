// ==========================================
// ACR 调校提取工具 - TSV 调校表导出
// ==========================================
// 文件: car_setups_<surface>.tsv
// 列: car / driveType / path / value（每个已填充字段一行）
// ==========================================

use crate::domain::car_report::SetupReport;
use crate::domain::types::Surface;
use crate::report::error::ReportResult;
use csv::WriterBuilder;
use std::io::Write;

pub const TSV_HEADERS: [&str; 4] = ["car", "driveType", "path", "value"];

/// 调校表文件名
pub fn setup_table_file_name(surface: Surface) -> String {
    format!("car_setups_{}.tsv", surface)
}

/// 写出单个路面的调校表
pub fn write_surface_tsv<W: Write>(
    report: &SetupReport,
    surface: Surface,
    writer: W,
) -> ReportResult<()> {
    let mut tsv = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    tsv.write_record(TSV_HEADERS)?;

    for (car, entry) in report {
        let drive_type = entry.drive_type.to_string();
        for (field, value) in entry.setup(surface).populated_fields() {
            let path = field.path();
            tsv.write_record([car.as_str(), drive_type.as_str(), path.as_str(), value])?;
        }
    }

    tsv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// 渲染为字符串
pub fn render_surface_tsv(report: &SetupReport, surface: Surface) -> ReportResult<String> {
    let mut buf = Vec::new();
    write_surface_tsv(report, surface, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::car_report::CarReport;
    use crate::domain::setting::OverrideSet;
    use crate::domain::setup::{CarSetup, SetupField};
    use crate::domain::types::{Corner, DriveType};

    #[test]
    fn test_render_surface_tsv() {
        let mut tarmac = CarSetup::skeleton(DriveType::Awd);
        tarmac.set(SetupField::Spring(Corner::FL), "45000 N/m".into());
        tarmac.set(SetupField::BrakeBias, "63% front".into());
        let mut gravel = tarmac.clone();
        gravel.set(SetupField::Spring(Corner::FL), "32000 N/m".into());

        let mut report = SetupReport::new();
        report.insert(
            "Lancia Delta".to_string(),
            CarReport {
                drive_type: DriveType::Awd,
                tarmac,
                gravel,
                tarmac_changes: OverrideSet::new(),
                gravel_changes: OverrideSet::new(),
            },
        );

        let text = render_surface_tsv(&report, Surface::Gravel).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "car\tdriveType\tpath\tvalue");
        assert_eq!(lines[1], "Lancia Delta\tAWD\tsuspension.springs.FL\t32000 N/m");
        assert_eq!(lines[2], "Lancia Delta\tAWD\tbrakes.brakeBias\t63% front");
        assert_eq!(lines.len(), 3);

        assert_eq!(setup_table_file_name(Surface::Tarmac), "car_setups_tarmac.tsv");
    }
}
