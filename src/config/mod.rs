pub mod cli;
pub mod settings;
pub mod toml_config;

pub use settings::{InputSource, Settings};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use command_line::{CliConfig, LogFormat};

#[cfg(feature = "cli")]
mod command_line {
    use super::{InputSource, Settings, TomlConfig};
    use crate::utils::error::Result;
    use clap::{Parser, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum LogFormat {
        Text,
        Json,
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "layergraph")]
    #[command(about = "Process architecture files into result.json")]
    pub struct CliConfig {
        #[arg(
            long,
            value_name = "FOLDER",
            conflicts_with = "layers",
            help = "Folder containing layers.json and units.md"
        )]
        pub input: Option<String>,

        #[arg(long, value_name = "FILE", requires = "units", help = "Path to layers.json")]
        pub layers: Option<String>,

        #[arg(
            long,
            value_name = "FILE",
            requires = "layers",
            help = "Path to units.md (required when --layers is used)"
        )]
        pub units: Option<String>,

        #[arg(long, value_name = "FILE", help = "Where to write the graph [default: result.json]")]
        pub output: Option<String>,

        #[arg(long, value_name = "FILE", help = "TOML config file; flags override it")]
        pub config: Option<String>,

        #[arg(long, help = "Write single-line JSON")]
        pub compact: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, value_enum, default_value_t = LogFormat::Text)]
        pub log_format: LogFormat,
    }

    impl CliConfig {
        pub fn input_source(&self) -> Option<InputSource> {
            if let Some(folder) = &self.input {
                return Some(InputSource::Folder(folder.clone()));
            }
            match (&self.layers, &self.units) {
                (Some(layers), Some(units)) => Some(InputSource::Files {
                    layers: layers.clone(),
                    units: units.clone(),
                }),
                _ => None,
            }
        }

        /// Loads `--config` when given and merges the flags over it.
        pub fn settings(&self) -> Result<Settings> {
            let file = match &self.config {
                Some(path) => {
                    let file = TomlConfig::from_file(path)?;
                    crate::utils::validation::Validate::validate(&file)?;
                    Some(file)
                }
                None => None,
            };

            Settings::merge(
                self.input_source(),
                self.output.clone(),
                self.compact,
                file.as_ref(),
            )
        }
    }

}
