use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::domain::services::colors::Palette;
use crate::utils::error::{GraphError, Result};
use crate::utils::validation::{validate_hex_color, validate_path, validate_range, Validate};
use std::path::Path;

pub const LAYERS_FILE: &str = "layers.json";
pub const UNITS_FILE: &str = "units.md";
pub const DEFAULT_OUTPUT: &str = "result.json";

/// Where the two input documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A folder holding `layers.json` and `units.md`.
    Folder(String),
    Files { layers: String, units: String },
}

impl InputSource {
    fn paths(&self) -> (String, String) {
        match self {
            InputSource::Folder(folder) => {
                let folder = Path::new(folder);
                (
                    folder.join(LAYERS_FILE).to_string_lossy().into_owned(),
                    folder.join(UNITS_FILE).to_string_lossy().into_owned(),
                )
            }
            InputSource::Files { layers, units } => (layers.clone(), units.clone()),
        }
    }

    /// Reads the `[input]` table, if it names anything.
    pub fn from_toml(config: &TomlConfig) -> Option<Self> {
        if let Some(folder) = config.input_folder() {
            return Some(InputSource::Folder(folder.to_string()));
        }
        match (config.layers_path(), config.units_path()) {
            (Some(layers), Some(units)) => Some(InputSource::Files {
                layers: layers.to_string(),
                units: units.to_string(),
            }),
            _ => None,
        }
    }
}

/// Fully resolved run settings, after merging the CLI over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub layers_path: String,
    pub units_path: String,
    pub output_path: String,
    pub pretty: bool,
    pub palette: Palette,
}

impl Settings {
    pub fn new(input: &InputSource) -> Self {
        let (layers_path, units_path) = input.paths();
        Self {
            layers_path,
            units_path,
            output_path: DEFAULT_OUTPUT.to_string(),
            pretty: true,
            palette: Palette::default(),
        }
    }

    /// Merges explicit choices over the config file.
    ///
    /// `input` and `output` come from the command line; `compact` only ever
    /// switches pretty printing off.
    pub fn merge(
        input: Option<InputSource>,
        output: Option<String>,
        compact: bool,
        file: Option<&TomlConfig>,
    ) -> Result<Self> {
        let input = input
            .or_else(|| file.and_then(InputSource::from_toml))
            .ok_or_else(|| GraphError::MissingConfigError {
                field: "input".to_string(),
            })?;

        let mut settings = Settings::new(&input);
        if let Some(file) = file {
            if let Some(path) = file.output_path() {
                settings.output_path = path.to_string();
            }
            if let Some(pretty) = file.pretty_output() {
                settings.pretty = pretty;
            }
            settings.palette = file.palette();
        }
        if let Some(output) = output {
            settings.output_path = output;
        }
        if compact {
            settings.pretty = false;
        }

        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn layers_path(&self) -> &str {
        &self.layers_path
    }

    fn units_path(&self) -> &str {
        &self.units_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn pretty_output(&self) -> bool {
        self.pretty
    }

    fn palette(&self) -> Palette {
        self.palette.clone()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("layers", &self.layers_path)?;
        validate_path("units", &self.units_path)?;
        validate_path("output", &self.output_path)?;
        validate_range("colors.lightness", self.palette.lightness, 0.0, 1.0)?;
        validate_range("colors.saturation", self.palette.saturation, 0.0, 1.0)?;
        validate_hex_color("colors.fallback", &self.palette.fallback)?;
        Ok(())
    }
}
