// ==========================================
// ACR 调校提取工具 - 提取编排器
// ==========================================
// 用途: 协调单车处理流程（逐车顺序执行，车与车之间不共享状态）
// 流程: 读取 → 建索引 → 基准格式化 → 各路面覆写提取 → 合并
// 红线: 单车失败只跳过该车，不中断批处理
// ==========================================

use crate::config::ExtractConfigReader;
use crate::domain::car_report::{CarReport, SetupReport};
use crate::domain::content::{ContentKind, ContentObject};
use crate::domain::setting::OverrideSet;
use crate::domain::setup::CarSetup;
use crate::domain::types::Surface;
use crate::engine::merge::MergeEngine;
use crate::engine::override_extractor::OverrideExtractor;
use crate::engine::reference_resolver::ReferenceResolver;
use crate::engine::setup_formatter::format_baseline;
use crate::importer::{ContentFileParser, ContentMapper, JsonContentParser, RecordStore};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

// ==========================================
// SkipReason - 跳过原因
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// 无 PhysicsCarSetup 对象
    MissingBaseline,
    /// PhysicsCarSetup 对象多于一个
    AmbiguousBaseline(usize),
    /// 文件读取/解析失败
    Import(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingBaseline => write!(f, "缺少基准调校 (PhysicsCarSetup)"),
            SkipReason::AmbiguousBaseline(n) => write!(f, "基准调校不唯一（{} 个）", n),
            SkipReason::Import(msg) => write!(f, "导入失败: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCar {
    pub name: String,
    pub source: PathBuf,
    pub reason: SkipReason,
}

// ==========================================
// BatchResult - 批处理结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub report: SetupReport,
    pub skipped: Vec<SkippedCar>,
}

// ==========================================
// ExtractionOrchestrator - 提取编排器
// ==========================================
pub struct ExtractionOrchestrator<C>
where
    C: ExtractConfigReader,
{
    config: Arc<C>,
    parser: JsonContentParser,
    mapper: ContentMapper,
    merge: MergeEngine,
}

impl<C> ExtractionOrchestrator<C>
where
    C: ExtractConfigReader,
{
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            parser: JsonContentParser,
            mapper: ContentMapper,
            merge: MergeEngine::new(),
        }
    }

    /// 处理单车内容对象
    ///
    /// # 返回
    /// - Ok(CarReport): 驱动形式 + 两个路面的合并调校 + 原始覆写
    /// - Err(SkipReason): 基准缺失或不唯一
    pub fn process_objects(&self, objects: Vec<ContentObject>) -> Result<CarReport, SkipReason> {
        let store = RecordStore::from_objects(objects);

        // ==========================================
        // 步骤1: 基准调校
        // ==========================================
        let baselines: Vec<&ContentObject> = store.by_kind(ContentKind::PhysicsCarSetup).collect();
        let baseline_object = match baselines.as_slice() {
            [one] => *one,
            [] => return Err(SkipReason::MissingBaseline),
            many => return Err(SkipReason::AmbiguousBaseline(many.len())),
        };

        let params = self.mapper.baseline_params(baseline_object);
        let drive_type = self.mapper.drive_type(baseline_object, &params);
        let baseline = format_baseline(drive_type, &params);
        debug!(drive_type = %drive_type, params = params.len(), "基准调校已格式化");

        // ==========================================
        // 步骤2: 各路面覆写提取 + 合并
        // ==========================================
        let extractor = OverrideExtractor::new(ReferenceResolver::new(&store));
        let (tarmac, tarmac_changes) =
            self.merge_surface(&store, &extractor, &baseline, Surface::Tarmac);
        let (gravel, gravel_changes) =
            self.merge_surface(&store, &extractor, &baseline, Surface::Gravel);

        Ok(CarReport {
            drive_type,
            tarmac,
            gravel,
            tarmac_changes,
            gravel_changes,
        })
    }

    fn merge_surface(
        &self,
        store: &RecordStore,
        extractor: &OverrideExtractor<'_>,
        baseline: &CarSetup,
        surface: Surface,
    ) -> (CarSetup, OverrideSet) {
        let overrides = self.surface_overrides(store, extractor, surface);
        let (merged, summary) = self.merge.merge_with_summary(baseline, &overrides);
        debug!(
            surface = %surface,
            applied = summary.applied,
            unclassified = summary.unclassified,
            dropped = summary.dropped,
            "路面覆写已合并"
        );
        (merged, overrides)
    }

    fn surface_overrides(
        &self,
        store: &RecordStore,
        extractor: &OverrideExtractor<'_>,
        surface: Surface,
    ) -> OverrideSet {
        let variant_name = self.config.variant_name(surface);
        let candidates = store.named(ContentKind::SurfaceVariant, variant_name);

        let variant_object = match candidates.as_slice() {
            [one] => *one,
            [] => {
                warn!(surface = %surface, variant = variant_name, "缺少路面变体，仅使用基准调校");
                return OverrideSet::new();
            }
            many => {
                warn!(
                    surface = %surface,
                    variant = variant_name,
                    count = many.len(),
                    "路面变体不唯一，仅使用基准调校"
                );
                return OverrideSet::new();
            }
        };

        match self.mapper.surface_variant(variant_object) {
            Some(variant) => extractor.extract(&variant),
            None => OverrideSet::new(),
        }
    }

    /// 处理单车文件
    ///
    /// # 返回
    /// - (显示名, 处理结果)
    pub fn process_file(&self, path: &Path) -> (String, Result<CarReport, SkipReason>) {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = self.config.display_name(&stem);

        let result = self
            .parser
            .parse_to_objects(path)
            .map_err(|e| SkipReason::Import(e.to_string()))
            .and_then(|objects| {
                debug!(car = %name, objects = objects.len(), "内容对象已读取");
                self.process_objects(objects)
            });

        (name, result)
    }

    /// 批处理（逐车顺序执行）
    ///
    /// # 规则
    /// - 跳过的车辆记录在 skipped 中
    /// - 显示名重复时后者覆盖前者
    pub fn process_batch(&self, paths: &[PathBuf]) -> BatchResult {
        let mut result = BatchResult::default();

        for path in paths {
            let (name, outcome) = self.process_file(path);
            match outcome {
                Ok(report) => {
                    info!(
                        car = %name,
                        drive_type = %report.drive_type,
                        tarmac_changes = report.tarmac_changes.len(),
                        gravel_changes = report.gravel_changes.len(),
                        "车辆调校提取完成"
                    );
                    if result.report.insert(name.clone(), report).is_some() {
                        warn!(car = %name, source = %path.display(), "车辆显示名重复，已覆盖先前结果");
                    }
                }
                Err(reason) => {
                    warn!(car = %name, source = %path.display(), reason = %reason, "车辆已跳过");
                    result.skipped.push(SkippedCar {
                        name,
                        source: path.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            processed = result.report.len(),
            skipped = result.skipped.len(),
            "批处理完成"
        );
        result
    }
}
