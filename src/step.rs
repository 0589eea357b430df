use crate::config::HemisphereConfig;
use crate::error::{ConfigError, Result};
use crate::write_hemisphere_model;

use std::fs;
use std::path::{Path, PathBuf};

/// Name of the model file written into the step's output directory
pub const OUTPUT_FILE_NAME: &str = "hemisphere.exfile";

/// A workflow step generating a hemisphere model into `<location>/<identifier>_output/`.
///
/// The identifier must be unique within the surrounding workflow. The workflow reports how many
/// steps currently use a candidate identifier; a count of 1 is accepted only when the identifier
/// is unchanged since the config was last accepted.
#[derive(Clone, Debug)]
pub struct HemisphereStep {
    location: PathBuf,
    config: HemisphereConfig,
    previous_identifier: String,
    configured: bool,
    output_path: Option<PathBuf>,
}

impl HemisphereStep {
    pub fn new(location: impl AsRef<Path>) -> Self {
        Self {
            location: location.as_ref().to_path_buf(),
            config: HemisphereConfig::default(),
            previous_identifier: String::new(),
            configured: false,
            output_path: None,
        }
    }

    pub fn config(&self) -> &HemisphereConfig {
        &self.config
    }

    pub fn identifier(&self) -> &str {
        &self.config.identifier
    }

    pub fn set_identifier(&mut self, identifier: impl AsRef<str>) {
        self.config.identifier = identifier.as_ref().to_string();
    }

    /// Whether the config passed validation when it was last set
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Path of the most recently written model file
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Whether `identifier`, used by `occurs_count` steps of the workflow, may name this step
    pub fn validate_identifier(&self, identifier: &str, occurs_count: usize) -> bool {
        occurs_count == 0 || (occurs_count == 1 && identifier == self.previous_identifier)
    }

    /// Replace the config and re-validate it. Returns the new configured state.
    pub fn configure(&mut self, config: HemisphereConfig, occurs_count: usize) -> bool {
        self.configured = self.validate_identifier(&config.identifier, occurs_count)
            && config.validate().is_ok();
        self.previous_identifier = config.identifier.clone();
        self.config = config;
        self.configured
    }

    /// Persisted form of the config: pretty JSON with sorted keys
    pub fn serialize(&self) -> String {
        self.config.to_json_string()
    }

    /// Update the config from its persisted form; keys absent from `text` keep their values
    pub fn deserialize(
        &mut self,
        text: &str,
        occurs_count: usize,
    ) -> std::result::Result<bool, ConfigError> {
        let mut config = self.config.clone();
        config.update_from_json_str(text)?;
        // a restored identifier counts as previously accepted
        self.previous_identifier = config.identifier.clone();
        Ok(self.configure(config, occurs_count))
    }

    /// Write the model into the step's output directory, creating it when missing
    pub fn execute(&mut self) -> Result<PathBuf> {
        let output_dir = self
            .location
            .join(format!("{}_output", self.config.identifier));
        if !output_dir.is_dir() {
            fs::create_dir(&output_dir)?;
            log::info!("Created output directory {}", output_dir.display());
        }

        let output_path = output_dir.join(OUTPUT_FILE_NAME);
        write_hemisphere_model(&output_path, &self.config)?;
        self.output_path = Some(output_path.clone());

        Ok(output_path)
    }
}
