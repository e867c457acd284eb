// ==========================================
// ACR 调校提取工具 - 合并引擎
// ==========================================
// 职责: 基准调校 + 路面覆写 → 该路面最终调校
// 红线: 纯函数，基准只读（深拷贝后写入）
//       覆写为绝对写入，重复合并结果不变
// ==========================================

use crate::domain::setting::OverrideSet;
use crate::domain::setup::CarSetup;
use crate::engine::setup_formatter::{apply, ApplyOutcome};

/// 单次合并统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub applied: usize,
    pub unclassified: usize,
    pub dropped: usize,
}

/// MergeEngine - 合并引擎
#[derive(Debug, Default)]
pub struct MergeEngine;

impl MergeEngine {
    pub fn new() -> Self {
        Self
    }

    /// 合并（基准不变）
    pub fn merge(&self, baseline: &CarSetup, overrides: &OverrideSet) -> CarSetup {
        self.merge_with_summary(baseline, overrides).0
    }

    /// 合并并返回统计
    pub fn merge_with_summary(
        &self,
        baseline: &CarSetup,
        overrides: &OverrideSet,
    ) -> (CarSetup, MergeSummary) {
        let mut merged = baseline.clone();
        let mut summary = MergeSummary::default();

        for (key, value) in overrides.iter() {
            match apply(&mut merged, key, value) {
                ApplyOutcome::Applied(_) => summary.applied += 1,
                ApplyOutcome::Unclassified => summary.unclassified += 1,
                ApplyOutcome::Unconvertible(_) | ApplyOutcome::MissingSection(_) => {
                    summary.dropped += 1
                }
            }
        }

        (merged, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::setting::{SettingMap, SettingValue};
    use crate::domain::setup::SetupField;
    use crate::domain::types::{Corner, DriveType};
    use crate::engine::setup_formatter::format_baseline;

    fn baseline() -> CarSetup {
        let mut params = SettingMap::new();
        params.insert("Suspensions.FrontLeft.SpringStiffness", SettingValue::Integer(45000));
        params.insert("Brakes.BrakesMain.FrontBias", SettingValue::Float(0.6));
        format_baseline(DriveType::Awd, &params)
    }

    #[test]
    fn test_merge_does_not_mutate_baseline() {
        let base = baseline();
        let snapshot = base.clone();

        let mut overrides = OverrideSet::new();
        overrides.insert("Suspensions.FrontLeft.SpringStiffness", SettingValue::Float(32000.0));

        let merged = MergeEngine::new().merge(&base, &overrides);
        assert_eq!(base, snapshot);
        assert_eq!(merged.get(SetupField::Spring(Corner::FL)), Some("32000 N/m"));
        assert_eq!(base.get(SetupField::Spring(Corner::FL)), Some("45000 N/m"));
    }

    #[test]
    fn test_db_reference_keeps_baseline_spring() {
        let base = baseline();
        let mut overrides = OverrideSet::new();
        overrides.insert(
            "Suspensions.FrontLeft.SpringStiffness",
            SettingValue::DbReference("GravelShort".to_string()),
        );

        let (merged, summary) = MergeEngine::new().merge_with_summary(&base, &overrides);
        assert_eq!(merged.get(SetupField::Spring(Corner::FL)), Some("45000 N/m"));
        assert_eq!(summary.dropped, 1);
        assert_eq!(summary.applied, 0);
    }

    #[test]
    fn test_merge_idempotent() {
        let base = baseline();
        let mut overrides = OverrideSet::new();
        overrides.insert("Brakes.BrakesMain.FrontBias", SettingValue::Float(0.63));
        overrides.insert("Wheels.RearLeft.Toe", SettingValue::Float(0.01));

        let engine = MergeEngine::new();
        let once = engine.merge(&base, &overrides);
        let twice = engine.merge(&once, &overrides);
        assert_eq!(once, twice);
        assert_eq!(once.get(SetupField::BrakeBias), Some("63% front"));
    }

    #[test]
    fn test_merge_summary_counts() {
        let base = format_baseline(DriveType::Fwd, &SettingMap::new());
        let mut overrides = OverrideSet::new();
        overrides.insert("Axles.Rear.ARBStiffness", SettingValue::Float(9000.0));
        overrides.insert("Differentials.Centre.CentreDifferentialRatio", SettingValue::Float(1.1));
        overrides.insert("Aero.Rear.Wing", SettingValue::Float(3.0));

        let (merged, summary) = MergeEngine::new().merge_with_summary(&base, &overrides);
        assert_eq!(
            summary,
            MergeSummary {
                applied: 1,
                unclassified: 1,
                dropped: 1
            }
        );
        assert!(merged.drivetrain.centre_diff_ratio.is_none());
    }
}
