// ==========================================
// ACR 调校提取工具 - 调校目录实现
// ==========================================
// 规则:
// - 元数据文件缺失: 记 warn，按空表处理
// - 调校表按 (car) 分组，path 列映射回调校字段，未知 path 忽略
// - 已知 path 原样保留，不按 driveType 列裁剪
// - get_setup(car, stage): 赛段路面为 gravel 取砂石表，否则取柏油表
// ==========================================

use crate::domain::catalog::{CarInfo, StageInfo};
use crate::domain::setup::{CarSetup, SetupField};
use crate::domain::types::{Axle, DiffParam, DriveType, Surface};
use crate::importer::{ImportResult, TableFileParser, TsvParser};
use crate::report::setup_table_file_name;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

pub const CARS_FILE: &str = "cars.tsv";
pub const STAGES_FILE: &str = "stages.tsv";

/// 目录中的单车单路面调校
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSetup {
    pub car: String,
    /// 调校表 driveType 列原文
    pub drive_type: String,
    pub surface: Surface,
    pub setup: CarSetup,
}

// ==========================================
// SetupCatalog
// ==========================================
#[derive(Debug, Default)]
pub struct SetupCatalog {
    cars: BTreeMap<String, CarInfo>,
    stages: BTreeMap<String, StageInfo>,
    tarmac_setups: BTreeMap<String, CatalogSetup>,
    gravel_setups: BTreeMap<String, CatalogSetup>,
}

impl SetupCatalog {
    /// 从数据目录加载全部表
    ///
    /// # 返回
    /// - Err: 文件存在但无法解析
    pub fn load(data_dir: &Path) -> ImportResult<Self> {
        let parser = TsvParser;
        let mut catalog = Self::default();

        for row in read_optional(&parser, &data_dir.join(CARS_FILE))? {
            let car = CarInfo {
                name: column(&row, "Car Name"),
                manufacturer: column(&row, "Manufacturer"),
                car_class: column(&row, "Class/Era"),
                drivetrain: column(&row, "Drivetrain"),
                notes: column(&row, "Notes"),
            };
            catalog.cars.insert(car.name.clone(), car);
        }

        for row in read_optional(&parser, &data_dir.join(STAGES_FILE))? {
            let stage = StageInfo {
                name: column(&row, "Stage Name (Variant)"),
                location: column(&row, "Location"),
                surface: column(&row, "Surface"),
                style: column(&row, "Style/Character"),
                length: column(&row, "Length"),
                notes: column(&row, "Notes"),
            };
            catalog.stages.insert(stage.name.clone(), stage);
        }

        for surface in Surface::ALL {
            let rows = read_optional(&parser, &data_dir.join(setup_table_file_name(surface)))?;
            let setups = build_setups(surface, rows);
            match surface {
                Surface::Tarmac => catalog.tarmac_setups = setups,
                Surface::Gravel => catalog.gravel_setups = setups,
            }
        }

        debug!(
            data_dir = %data_dir.display(),
            cars = catalog.cars.len(),
            stages = catalog.stages.len(),
            tarmac_setups = catalog.tarmac_setups.len(),
            gravel_setups = catalog.gravel_setups.len(),
            "调校目录已加载"
        );
        Ok(catalog)
    }

    /// 有调校数据的车辆（两表并集，有序）
    pub fn car_list(&self) -> Vec<String> {
        let mut cars: Vec<String> = self
            .tarmac_setups
            .keys()
            .chain(self.gravel_setups.keys())
            .cloned()
            .collect();
        cars.sort();
        cars.dedup();
        cars
    }

    pub fn stage_list(&self) -> Vec<String> {
        self.stages.keys().cloned().collect()
    }

    pub fn gravel_stages(&self) -> Vec<String> {
        self.stages_with_surface("gravel")
    }

    pub fn tarmac_stages(&self) -> Vec<String> {
        self.stages_with_surface("tarmac")
    }

    fn stages_with_surface(&self, surface: &str) -> Vec<String> {
        self.stages
            .values()
            .filter(|s| s.surface.trim().eq_ignore_ascii_case(surface))
            .map(|s| s.name.clone())
            .collect()
    }

    /// 按赛段路面取调校
    ///
    /// # 返回
    /// - None: 赛段未知，或该车在对应路面表中无数据
    pub fn get_setup(&self, car: &str, stage: &str) -> Option<&CatalogSetup> {
        let stage = self.stages.get(stage)?;
        match stage.surface_kind() {
            Surface::Gravel => self.gravel_setups.get(car),
            Surface::Tarmac => self.tarmac_setups.get(car),
        }
    }

    /// 赛段路面原文
    pub fn stage_surface(&self, stage: &str) -> Option<&str> {
        self.stages.get(stage).map(|s| s.surface.as_str())
    }

    pub fn stage_info(&self, stage: &str) -> Option<&StageInfo> {
        self.stages.get(stage)
    }

    pub fn car_info(&self, car: &str) -> Option<&CarInfo> {
        self.cars.get(car)
    }
}

fn read_optional(parser: &TsvParser, path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
    if !path.is_file() {
        warn!(path = %path.display(), "数据文件不存在，按空表处理");
        return Ok(Vec::new());
    }
    parser.parse_to_rows(path)
}

fn column(row: &HashMap<String, String>, name: &str) -> String {
    row.get(name)
        .map(|v| v.trim_matches('"').to_string())
        .unwrap_or_default()
}

/// 调校表行 → 单车调校
fn build_setups(surface: Surface, rows: Vec<HashMap<String, String>>) -> BTreeMap<String, CatalogSetup> {
    // 车辆 → (driveType 原文, [(字段, 值)])
    let mut grouped: BTreeMap<String, (String, Vec<(SetupField, String)>)> = BTreeMap::new();

    for row in &rows {
        let car = column(row, "car");
        if car.is_empty() {
            continue;
        }
        let entry = grouped
            .entry(car)
            .or_insert_with(|| (column(row, "driveType"), Vec::new()));

        let path = column(row, "path");
        match SetupField::from_path(&path) {
            Some(field) => entry.1.push((field, column(row, "value"))),
            None => debug!(path = %path, "未知调校路径，已忽略"),
        }
    }

    grouped
        .into_iter()
        .map(|(car, (drive_type, values))| {
            let drive = DriveType::parse(&drive_type).unwrap_or_else(|| infer_drive(&values));
            let mut setup = CarSetup::skeleton(drive);
            for (field, value) in values {
                setup.set_as_given(field, value);
            }

            let catalog_setup = CatalogSetup {
                car: car.clone(),
                drive_type,
                surface,
                setup,
            };
            (car, catalog_setup)
        })
        .collect()
}

// driveType 列无法识别时按字段反推
fn infer_drive(values: &[(SetupField, String)]) -> DriveType {
    let has = |axle: Axle| {
        values
            .iter()
            .any(|(f, _)| DiffParam::ALL.iter().any(|p| *f == SetupField::Diff(axle, *p)))
    };
    let has_centre = values.iter().any(|(f, _)| {
        matches!(f, SetupField::CentreDiffRatio | SetupField::FrontTorqueBias)
    });
    DriveType::infer(has(Axle::Front), has(Axle::Rear), has_centre)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Corner;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, lines: &[&str]) {
        fs::write(dir.join(name), lines.join("\n") + "\n").unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            STAGES_FILE,
            &[
                "Stage Name (Variant)\tLocation\tSurface\tStyle/Character\tLength\tNotes",
                "Col de Turini\tFrance\tTarmac\tMountain\t15 km\t",
                "Ouninpohja\tFinland\tGravel\tFast\t33 km\tJumps",
            ],
        );
        write(
            dir.path(),
            CARS_FILE,
            &[
                "Car Name\tManufacturer\tClass/Era\tDrivetrain\tNotes",
                "Lancia Delta\tLancia\tGroup A\tAWD\t",
            ],
        );
        write(
            dir.path(),
            "car_setups_tarmac.tsv",
            &[
                "car\tdriveType\tpath\tvalue",
                "Lancia Delta\tAWD\tsuspension.springs.FL\t45000 N/m",
                "Lancia Delta\tAWD\tbrakes.brakeBias\t63% front",
            ],
        );
        write(
            dir.path(),
            "car_setups_gravel.tsv",
            &[
                "car\tdriveType\tpath\tvalue",
                "Lancia Delta\tAWD\tsuspension.springs.FL\t32000 N/m",
                "Lancia Delta\tAWD\tsuspension.unknown\tx",
                "Alpine A110\tRWD\tdrivetrain.rearDiff.lsdPreload\t90 Nm",
            ],
        );
        dir
    }

    #[test]
    fn test_get_setup_by_stage_surface() {
        let dir = fixture();
        let catalog = SetupCatalog::load(dir.path()).unwrap();

        let tarmac = catalog.get_setup("Lancia Delta", "Col de Turini").unwrap();
        assert_eq!(tarmac.surface, Surface::Tarmac);
        assert_eq!(tarmac.setup.get(SetupField::Spring(Corner::FL)), Some("45000 N/m"));

        let gravel = catalog.get_setup("Lancia Delta", "Ouninpohja").unwrap();
        assert_eq!(gravel.setup.get(SetupField::Spring(Corner::FL)), Some("32000 N/m"));
        assert_eq!(gravel.drive_type, "AWD");

        assert!(catalog.get_setup("Lancia Delta", "Unknown Stage").is_none());
        assert!(catalog.get_setup("Alpine A110", "Col de Turini").is_none());
    }

    #[test]
    fn test_lists_and_info() {
        let dir = fixture();
        let catalog = SetupCatalog::load(dir.path()).unwrap();

        assert_eq!(catalog.car_list(), vec!["Alpine A110", "Lancia Delta"]);
        assert_eq!(catalog.stage_list(), vec!["Col de Turini", "Ouninpohja"]);
        assert_eq!(catalog.gravel_stages(), vec!["Ouninpohja"]);
        assert_eq!(catalog.tarmac_stages(), vec!["Col de Turini"]);
        assert_eq!(catalog.stage_surface("Ouninpohja"), Some("Gravel"));
        assert_eq!(catalog.stage_info("Ouninpohja").unwrap().notes, "Jumps");
        assert_eq!(catalog.car_info("Lancia Delta").unwrap().car_class, "Group A");
        assert!(catalog.car_info("Alpine A110").is_none());
    }

    #[test]
    fn test_rows_kept_regardless_of_drive_type() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            STAGES_FILE,
            &[
                "Stage Name (Variant)\tLocation\tSurface\tStyle/Character\tLength\tNotes",
                "Col de Turini\tFrance\tTarmac\tMountain\t15 km\t",
            ],
        );
        write(
            dir.path(),
            "car_setups_tarmac.tsv",
            &[
                "car\tdriveType\tpath\tvalue",
                "Alpine A110\tRWD\tdrivetrain.frontDiff.lsdPreload\t40 Nm",
                "Alpine A110\tRWD\tdrivetrain.centreDiffRatio\t1.1",
            ],
        );

        let catalog = SetupCatalog::load(dir.path()).unwrap();
        let setup = &catalog.get_setup("Alpine A110", "Col de Turini").unwrap().setup;
        assert_eq!(setup.drive_type, DriveType::Rwd);
        assert_eq!(
            setup.get(SetupField::Diff(Axle::Front, DiffParam::LsdPreload)),
            Some("40 Nm")
        );
        assert_eq!(setup.get(SetupField::CentreDiffRatio), Some("1.1"));
    }

    #[test]
    fn test_missing_files_are_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = SetupCatalog::load(dir.path()).unwrap();
        assert!(catalog.car_list().is_empty());
        assert!(catalog.stage_list().is_empty());
    }
}
