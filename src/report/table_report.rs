// ==========================================
// ACR 调校提取工具 - 文本报告（定宽表格）
// ==========================================
// 格式: 每车一张框线表，柏油/砂石两列并排，五个分段依次列出
//       两路面取值不同的行在末列标记 *
//       表格下方按粗分类列出原始覆写
// ==========================================

use crate::domain::car_report::{CarReport, SetupReport};
use crate::domain::setting::{OverrideSet, SettingValue};
use crate::domain::setup::{SetupField, SetupSection};
use crate::domain::types::{KeyCategory, Surface};
use crate::engine::key_classifier::categorize;
use std::collections::BTreeMap;
use std::fmt::Write;

const MISSING: &str = "-";
const CHANGED: &str = "*";

enum Row {
    Section(SetupSection),
    Field {
        label: String,
        tarmac: String,
        gravel: String,
    },
    Empty,
}

impl Row {
    fn cells(&self) -> [String; 4] {
        match self {
            Row::Section(section) => [section.to_string(), String::new(), String::new(), String::new()],
            Row::Field {
                label,
                tarmac,
                gravel,
            } => {
                let marker = if tarmac != gravel { CHANGED } else { "" };
                [
                    format!("  {}", label),
                    tarmac.clone(),
                    gravel.clone(),
                    marker.to_string(),
                ]
            }
            Row::Empty => [format!("  {}", MISSING), String::new(), String::new(), String::new()],
        }
    }
}

/// 渲染全部车辆
pub fn render_table(report: &SetupReport) -> String {
    let mut out = String::new();
    for (name, car) in report {
        out.push_str(&render_car(name, car));
        out.push('\n');
    }
    out
}

/// 渲染单车
pub fn render_car(name: &str, car: &CarReport) -> String {
    let rows = collect_rows(car);
    let header = [
        "Parameter".to_string(),
        "Tarmac".to_string(),
        "Gravel".to_string(),
        String::new(),
    ];
    let title = format!("{} ({})", name, car.drive_type);

    // 列宽
    let mut widths = [0usize; 4];
    for cells in std::iter::once(header.clone()).chain(rows.iter().map(Row::cells)) {
        for (w, cell) in widths.iter_mut().zip(cells.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths[3] = widths[3].max(CHANGED.len());

    let inner = |widths: &[usize; 4]| widths.iter().sum::<usize>() + 3 * widths.len() - 1;
    let title_len = title.chars().count();
    if title_len + 2 > inner(&widths) {
        widths[0] += title_len + 2 - inner(&widths);
    }
    let inner_width = inner(&widths);

    let mut out = String::new();
    let _ = writeln!(out, "┌{}┐", "─".repeat(inner_width));
    let _ = writeln!(out, "│ {:<w$} │", title, w = inner_width - 2);
    out.push_str(&rule('├', '┬', '┤', &widths));
    out.push_str(&line(&header, &widths));
    out.push_str(&rule('├', '┼', '┤', &widths));
    for row in &rows {
        out.push_str(&line(&row.cells(), &widths));
    }
    out.push_str(&rule('└', '┴', '┘', &widths));

    for surface in Surface::ALL {
        out.push_str(&render_changes(surface, car.changes(surface)));
    }
    out
}

fn collect_rows(car: &CarReport) -> Vec<Row> {
    let mut rows = Vec::new();
    for section in SetupSection::ALL {
        rows.push(Row::Section(section));

        let fields: Vec<SetupField> = SetupField::all()
            .into_iter()
            .filter(|f| f.section() == section)
            .filter(|f| car.tarmac.get(*f).is_some() || car.gravel.get(*f).is_some())
            .collect();

        if fields.is_empty() {
            rows.push(Row::Empty);
            continue;
        }

        for field in fields {
            rows.push(Row::Field {
                label: field.local_path(),
                tarmac: car.tarmac.get(field).unwrap_or(MISSING).to_string(),
                gravel: car.gravel.get(field).unwrap_or(MISSING).to_string(),
            });
        }
    }
    rows
}

fn rule(left: char, mid: char, right: char, widths: &[usize; 4]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(&mid.to_string()), right)
}

fn line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut out = String::from("│");
    for (cell, w) in cells.iter().zip(widths.iter()) {
        let _ = write!(out, " {:<w$} │", cell, w = *w);
    }
    out.push('\n');
    out
}

/// 原始覆写列表（按粗分类分组）
fn render_changes(surface: Surface, changes: &OverrideSet) -> String {
    let mut out = String::new();
    if changes.is_empty() {
        let _ = writeln!(out, "  {} changes: none", surface);
        return out;
    }

    let _ = writeln!(out, "  {} changes ({}):", surface, changes.len());
    let mut grouped: BTreeMap<KeyCategory, Vec<(&str, &SettingValue)>> = BTreeMap::new();
    for (key, value) in changes.iter() {
        grouped.entry(categorize(key)).or_default().push((key, value));
    }

    for (category, entries) in grouped {
        let _ = writeln!(out, "    [{}]", category);
        for (key, value) in entries {
            let _ = writeln!(out, "      {} = {} ({})", key, value, value.kind());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::setup::CarSetup;
    use crate::domain::types::{Corner, DriveType};

    fn car() -> CarReport {
        let mut tarmac = CarSetup::skeleton(DriveType::Fwd);
        tarmac.set(SetupField::Spring(Corner::FL), "45000 N/m".into());
        tarmac.set(SetupField::BrakeBias, "60% front".into());
        let mut gravel = tarmac.clone();
        gravel.set(SetupField::Spring(Corner::FL), "32000 N/m".into());

        let mut gravel_changes = OverrideSet::new();
        gravel_changes.insert("Suspensions.FrontLeft.SpringStiffness", SettingValue::Float(32000.0));
        gravel_changes.insert("Aero.Rear.Wing", SettingValue::Integer(2));

        CarReport {
            drive_type: DriveType::Fwd,
            tarmac,
            gravel,
            tarmac_changes: OverrideSet::new(),
            gravel_changes,
        }
    }

    #[test]
    fn test_render_car_layout() {
        let text = render_car("Peugeot 205 GTI", &car());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with('┌') && lines[0].ends_with('┐'));
        assert!(lines[1].contains("Peugeot 205 GTI (FWD)"));

        // 表格各行等宽
        let table: Vec<&str> = lines.iter().take_while(|l| !l.starts_with("  ")).copied().collect();
        let width = table[0].chars().count();
        assert!(table.iter().all(|l| l.chars().count() == width));

        for section in ["DRIVETRAIN", "SUSPENSION", "DAMPERS", "TYRES", "BRAKES"] {
            assert!(text.contains(section), "missing section {}", section);
        }
    }

    #[test]
    fn test_render_car_marks_differences() {
        let text = render_car("Peugeot 205 GTI", &car());
        let spring = text.lines().find(|l| l.contains("springs.FL")).unwrap();
        assert!(spring.contains("45000 N/m") && spring.contains("32000 N/m"));
        assert!(spring.contains(CHANGED));

        let bias = text.lines().find(|l| l.contains("brakeBias")).unwrap();
        assert!(!bias.contains(CHANGED));
    }

    #[test]
    fn test_render_changes_grouped() {
        let text = render_car("Peugeot 205 GTI", &car());
        assert!(text.contains("tarmac changes: none"));
        assert!(text.contains("gravel changes (2):"));

        let suspension = text.find("[suspension]").unwrap();
        let other = text.find("[other]").unwrap();
        assert!(suspension < other);
        assert!(text.contains("Suspensions.FrontLeft.SpringStiffness = 32000 (float)"));
        assert!(text.contains("Aero.Rear.Wing = 2 (integer)"));
    }
}
