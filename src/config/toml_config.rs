use crate::domain::services::colors::Palette;
use crate::utils::error::{GraphError, Result};
use crate::utils::validation::{validate_hex_color, validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub colors: Option<ColorsConfig>,
}

/// Either `folder`, or both `layers` and `units`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub folder: Option<String>,
    pub layers: Option<String>,
    pub units: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorsConfig {
    pub lightness: Option<f64>,
    pub saturation: Option<f64>,
    pub fallback: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GraphError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GraphError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ARCH_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn input_folder(&self) -> Option<&str> {
        self.input.as_ref().and_then(|i| i.folder.as_deref())
    }

    pub fn layers_path(&self) -> Option<&str> {
        self.input.as_ref().and_then(|i| i.layers.as_deref())
    }

    pub fn units_path(&self) -> Option<&str> {
        self.input.as_ref().and_then(|i| i.units.as_deref())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn pretty_output(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.pretty)
    }

    /// Palette with unset fields taken from the default.
    pub fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        if let Some(colors) = &self.colors {
            if let Some(lightness) = colors.lightness {
                palette.lightness = lightness;
            }
            if let Some(saturation) = colors.saturation {
                palette.saturation = saturation;
            }
            if let Some(fallback) = &colors.fallback {
                palette.fallback = fallback.clone();
            }
        }
        palette
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(input) = &self.input {
            if input.folder.is_some() && (input.layers.is_some() || input.units.is_some()) {
                return Err(GraphError::ConfigError {
                    message: "input.folder cannot be combined with input.layers or input.units"
                        .to_string(),
                });
            }
            if input.layers.is_some() != input.units.is_some() {
                return Err(GraphError::ConfigError {
                    message: "input.layers and input.units must be given together".to_string(),
                });
            }
            if let Some(folder) = &input.folder {
                validate_path("input.folder", folder)?;
            }
        }

        if let Some(path) = self.output_path() {
            validate_path("output.path", path)?;
        }

        let palette = self.palette();
        validate_range("colors.lightness", palette.lightness, 0.0, 1.0)?;
        validate_range("colors.saturation", palette.saturation, 0.0, 1.0)?;
        validate_hex_color("colors.fallback", &palette.fallback)?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
