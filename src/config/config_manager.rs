// ==========================================
// ACR 调校提取工具 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 优先级（低 → 高）: 内置默认值 → JSON 配置文件 → 环境变量 → 命令行参数
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::extract_config_trait::ExtractConfigReader;
use crate::domain::types::Surface;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// ==========================================
// ExtractConfig - 配置项全集
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub tarmac_variant: String,
    pub gravel_variant: String,
    pub output_dir: PathBuf,
    /// 文件名主干 → 显示名
    pub display_names: BTreeMap<String, String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tarmac_variant: defaults::TARMAC_VARIANT.to_string(),
            gravel_variant: defaults::GRAVEL_VARIANT.to_string(),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            display_names: BTreeMap::new(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: ExtractConfig,
}

impl ConfigManager {
    /// 使用内置默认值创建
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// 按优先级加载配置（不含命令行参数）
    ///
    /// # 参数
    /// - explicit_path: 显式指定的配置文件（必须存在）
    ///
    /// # 逻辑
    /// 1. 显式路径 → 读取，不存在即报错
    /// 2. 否则默认路径存在时读取
    /// 3. 应用环境变量覆写
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        let mut manager = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::new(),
            },
        };

        manager.apply_env_overrides();
        Ok(manager)
    }

    /// 默认配置文件路径: <config_dir>/acr-setup-extract/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(crate::APP_NAME).join("config.json"))
    }

    /// 从 JSON 文件读取（缺省字段取默认值）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let read_error = |message: String| ConfigError::ConfigReadError {
            path: path.display().to_string(),
            message,
        };

        let text = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
        let config: ExtractConfig =
            serde_json::from_str(&text).map_err(|e| read_error(e.to_string()))?;

        tracing::debug!(path = %path.display(), "已加载配置文件");
        Ok(Self { config })
    }

    /// 应用进程环境变量
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// 应用环境变量覆写（读取函数可注入，便于测试）
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = read(env_keys::TARMAC_VARIANT) {
            self.config.tarmac_variant = v;
        }
        if let Some(v) = read(env_keys::GRAVEL_VARIANT) {
            self.config.gravel_variant = v;
        }
        if let Some(v) = read(env_keys::OUTPUT_DIR) {
            self.config.output_dir = PathBuf::from(v);
        }
    }

    /// 命令行指定输出目录（最高优先级）
    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.config.output_dir = dir.into();
    }

    /// 校验配置值
    ///
    /// # 规则
    /// - 变体名非空
    /// - 两个路面的变体名不同
    pub fn validate(&self) -> ConfigResult<()> {
        for (key, value) in [
            (config_keys::TARMAC_VARIANT, &self.config.tarmac_variant),
            (config_keys::GRAVEL_VARIANT, &self.config.gravel_variant),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ConfigValueError {
                    key: key.to_string(),
                    message: "变体名不能为空".to_string(),
                });
            }
        }

        if self.config.tarmac_variant == self.config.gravel_variant {
            return Err(ConfigError::ConfigValueError {
                key: config_keys::GRAVEL_VARIANT.to_string(),
                message: format!("与 tarmac 变体名相同: {}", self.config.gravel_variant),
            });
        }

        Ok(())
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }
}

// ==========================================
// ExtractConfigReader Trait 实现
// ==========================================
impl ExtractConfigReader for ConfigManager {
    fn variant_name(&self, surface: Surface) -> &str {
        match surface {
            Surface::Tarmac => &self.config.tarmac_variant,
            Surface::Gravel => &self.config.gravel_variant,
        }
    }

    fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    fn display_name(&self, file_stem: &str) -> String {
        match self.config.display_names.get(file_stem) {
            Some(name) => name.clone(),
            None => file_stem.replace('_', " "),
        }
    }
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const TARMAC_VARIANT: &str = "CarSetupVariantsSurface_0";
    pub const GRAVEL_VARIANT: &str = "CarSetupVariantsSurface_1";
    pub const OUTPUT_DIR: &str = "output";
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const TARMAC_VARIANT: &str = "tarmac_variant";
    pub const GRAVEL_VARIANT: &str = "gravel_variant";
}

// ==========================================
// 环境变量名
// ==========================================
pub mod env_keys {
    pub const CONFIG_PATH: &str = "ACR_SETUP_EXTRACT_CONFIG";
    pub const TARMAC_VARIANT: &str = "ACR_SETUP_EXTRACT_TARMAC_VARIANT";
    pub const GRAVEL_VARIANT: &str = "ACR_SETUP_EXTRACT_GRAVEL_VARIANT";
    pub const OUTPUT_DIR: &str = "ACR_SETUP_EXTRACT_OUTPUT_DIR";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let manager = ConfigManager::new();
        assert_eq!(manager.variant_name(Surface::Tarmac), "CarSetupVariantsSurface_0");
        assert_eq!(manager.variant_name(Surface::Gravel), "CarSetupVariantsSurface_1");
        assert_eq!(manager.output_dir(), Path::new("output"));
        assert_eq!(manager.display_name("Lancia_Delta_Integrale"), "Lancia Delta Integrale");
        assert!(manager.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_and_display_names() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"gravel_variant": "Gravel_V", "display_names": {{"alpine_a110": "Alpine A110 (1973)"}}}}"#
        )
        .unwrap();

        let manager = ConfigManager::from_file(file.path()).unwrap();
        assert_eq!(manager.variant_name(Surface::Tarmac), "CarSetupVariantsSurface_0");
        assert_eq!(manager.variant_name(Surface::Gravel), "Gravel_V");
        assert_eq!(manager.display_name("alpine_a110"), "Alpine A110 (1973)");
    }

    #[test]
    fn test_from_file_errors() {
        let missing = ConfigManager::from_file(Path::new("no/such/config.json"));
        assert!(matches!(missing, Err(ConfigError::ConfigReadError { .. })));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let invalid = ConfigManager::from_file(file.path());
        assert!(matches!(invalid, Err(ConfigError::ConfigReadError { .. })));
    }

    #[test]
    fn test_env_overrides_and_cli_precedence() {
        let env: HashMap<&str, &str> = [
            (env_keys::TARMAC_VARIANT, "T_Variant"),
            (env_keys::OUTPUT_DIR, "env_out"),
            (env_keys::GRAVEL_VARIANT, "   "),
        ]
        .into_iter()
        .collect();

        let mut manager = ConfigManager::new();
        manager.apply_env_overrides_from(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(manager.variant_name(Surface::Tarmac), "T_Variant");
        assert_eq!(manager.variant_name(Surface::Gravel), "CarSetupVariantsSurface_1");
        assert_eq!(manager.output_dir(), Path::new("env_out"));

        manager.set_output_dir("cli_out");
        assert_eq!(manager.output_dir(), Path::new("cli_out"));
    }

    #[test]
    fn test_validate_rejects_same_variant() {
        let manager = ConfigManager::from_config(ExtractConfig {
            gravel_variant: defaults::TARMAC_VARIANT.to_string(),
            ..Default::default()
        });
        assert!(matches!(
            manager.validate(),
            Err(ConfigError::ConfigValueError { .. })
        ));
    }
}
