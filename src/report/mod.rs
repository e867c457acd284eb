// ==========================================
// ACR 调校提取工具 - 报告层
// ==========================================
// 职责: 合并结果 → JSON / 定宽文本表 / TSV 调校表
// ==========================================

pub mod error;
pub mod json_report;
pub mod table_report;
pub mod tsv_export;

pub use error::{ReportError, ReportResult};
pub use json_report::render_json;
pub use table_report::{render_car, render_table};
pub use tsv_export::{render_surface_tsv, setup_table_file_name, write_surface_tsv};

use crate::domain::car_report::SetupReport;
use crate::domain::types::Surface;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const JSON_REPORT_FILE: &str = "car_setups.json";
pub const TABLE_REPORT_FILE: &str = "car_setups.txt";

/// 报告格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportFormat {
    Json,
    Table,
    Tsv,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Json, ReportFormat::Table, ReportFormat::Tsv];
}

// ==========================================
// ReportWriter - 报告落盘
// ==========================================
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 按格式写出报告
    ///
    /// # 返回
    /// - 已写出的文件路径（按格式顺序）
    pub fn write(&self, report: &SetupReport, formats: &[ReportFormat]) -> ReportResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).map_err(|e| self.write_error(&self.output_dir, e))?;

        let mut written = Vec::new();
        for format in formats {
            match format {
                ReportFormat::Json => {
                    let path = self.output_dir.join(JSON_REPORT_FILE);
                    self.write_text(&path, &render_json(report)?)?;
                    written.push(path);
                }
                ReportFormat::Table => {
                    let path = self.output_dir.join(TABLE_REPORT_FILE);
                    self.write_text(&path, &render_table(report))?;
                    written.push(path);
                }
                ReportFormat::Tsv => {
                    for surface in Surface::ALL {
                        let path = self.output_dir.join(setup_table_file_name(surface));
                        let file = File::create(&path).map_err(|e| self.write_error(&path, e))?;
                        write_surface_tsv(report, surface, BufWriter::new(file))?;
                        written.push(path);
                    }
                }
            }
        }

        for path in &written {
            tracing::info!(path = %path.display(), "报告已写出");
        }
        Ok(written)
    }

    fn write_text(&self, path: &Path, text: &str) -> ReportResult<()> {
        fs::write(path, text).map_err(|e| self.write_error(path, e))
    }

    fn write_error(&self, path: &Path, err: std::io::Error) -> ReportError {
        ReportError::WriteError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_all_formats() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/out");
        let writer = ReportWriter::new(&out);

        let written = writer.write(&SetupReport::new(), &ReportFormat::ALL).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "car_setups.json",
                "car_setups.txt",
                "car_setups_tarmac.tsv",
                "car_setups_gravel.tsv"
            ]
        );
        assert_eq!(fs::read_to_string(out.join("car_setups.json")).unwrap(), "{}\n");
        assert_eq!(
            fs::read_to_string(out.join("car_setups_gravel.tsv")).unwrap(),
            "car\tdriveType\tpath\tvalue\n"
        );
    }
}
