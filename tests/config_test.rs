// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 配置文件 + 环境变量驱动编排器的变体选择与显示名
// ==========================================


use acr_setup_extract::config::{env_keys, ConfigError, ConfigManager, ExtractConfigReader};
use acr_setup_extract::domain::Corner;
use acr_setup_extract::engine::ExtractionOrchestrator;
use acr_setup_extract::{SetupField, Surface};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use test_helpers::*;

#[test]
fn test_explicit_config_must_exist() {
    let result = ConfigManager::load(Some(Path::new("definitely/missing/config.json")));
    assert!(matches!(result, Err(ConfigError::ConfigReadError { .. })));
}

#[test]
fn test_config_file_drives_variant_names_and_display_names() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        json!({
            "tarmac_variant": "Tarmac_Setup",
            "gravel_variant": "Gravel_Setup",
            "display_names": {"alpine_a110": "Alpine A110 1600S"}
        })
        .to_string(),
    )
    .unwrap();

    let mut config = ConfigManager::from_file(&config_path).unwrap();
    config.apply_env_overrides_from(|_| None);
    assert_eq!(config.variant_name(Surface::Gravel), "Gravel_Setup");

    let car = write_car_file(
        dir.path(),
        "alpine_a110",
        &[
            baseline("RWD", json!({"Suspensions": {"RearLeft": {"SpringStiffness": 30000}}})),
            variant("Gravel_Setup", &[("Suspensions.RearLeft.SpringStiffness", "F0")]),
            float_override("F0", "Gravel_Setup", 24000.0),
            // 默认命名的变体在此配置下不参与
            variant(GRAVEL, &[("Suspensions.RearLeft.SpringStiffness", "F1")]),
            float_override("F1", GRAVEL, 99999.0),
        ],
    );

    let orch = ExtractionOrchestrator::new(Arc::new(config));
    let (name, result) = orch.process_file(&car);
    let report = result.unwrap();

    assert_eq!(name, "Alpine A110 1600S");
    assert_eq!(report.gravel.get(SetupField::Spring(Corner::RL)), Some("24000 N/m"));
    // 柏油变体缺失: 仅基准
    assert_eq!(report.tarmac.get(SetupField::Spring(Corner::RL)), Some("30000 N/m"));
    assert!(report.tarmac_changes.is_empty());
}

#[test]
fn test_env_overrides_file_values() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{"output_dir": "from_file"}"#).unwrap();

    let mut config = ConfigManager::from_file(&config_path).unwrap();
    assert_eq!(config.output_dir(), Path::new("from_file"));

    config.apply_env_overrides_from(|key| {
        (key == env_keys::OUTPUT_DIR).then(|| "from_env".to_string())
    });
    assert_eq!(config.output_dir(), Path::new("from_env"));
    assert_eq!(config.variant_name(Surface::Tarmac), "CarSetupVariantsSurface_0");
}
