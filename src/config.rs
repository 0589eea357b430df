use crate::error::ConfigError;

use json::{object, JsonValue};

pub const KEY_IDENTIFIER: &str = "identifier";
pub const KEY_ELEMENTS_AROUND: &str = "elements around";
pub const KEY_ELEMENTS_UP: &str = "elements up";
pub const KEY_ELEMENTS_ALONG_STEM: &str = "elements along stem";
pub const KEY_RADIUS: &str = "radius";
pub const KEY_STEM_LENGTH: &str = "stem length";

/// Smallest number of elements around which leaves a non-empty row of pole cap nodes
pub const MIN_ELEMENTS_AROUND: usize = 6;

/// Upper bound on the node and element counts of a mesh
pub const MAX_MESH_SIZE: usize = 1 << 24;

/// Parameters of a hemisphere model.
///
/// `radius` and `stem_length` are carried through persistence but the geometry is always built
/// on the unit sphere, with each stem row one hemisphere row step long.
#[derive(Clone, Debug, PartialEq)]
pub struct HemisphereConfig {
    /// Name of the owning workflow step; not used by the geometry
    pub identifier: String,
    pub elements_around: usize,
    pub elements_up: usize,
    pub elements_along_stem: usize,
    pub radius: f64,
    pub stem_length: f64,
}

impl Default for HemisphereConfig {
    fn default() -> Self {
        Self {
            identifier: String::new(),
            elements_around: 12,
            elements_up: 3,
            elements_along_stem: 1,
            radius: 1.0,
            stem_length: 0.5,
        }
    }
}

impl HemisphereConfig {
    pub fn new(elements_around: usize, elements_up: usize, elements_along_stem: usize) -> Self {
        Self {
            elements_around,
            elements_up,
            elements_along_stem,
            ..Default::default()
        }
    }

    /// Check the element counts before any geometry is computed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elements_around < MIN_ELEMENTS_AROUND || self.elements_around % 2 != 0 {
            return Err(ConfigError::ElementsAround(self.elements_around));
        }
        if self.elements_up < 1 {
            return Err(ConfigError::ElementsUp(self.elements_up));
        }
        if !self.mesh_size_in_range() {
            return Err(ConfigError::TooManyElements);
        }
        if !self.radius.is_finite() {
            return Err(ConfigError::NotAReal(KEY_RADIUS));
        }
        if !self.stem_length.is_finite() {
            return Err(ConfigError::NotAReal(KEY_STEM_LENGTH));
        }
        Ok(())
    }

    /// Node and element counts fit below [MAX_MESH_SIZE] (elements around must already be valid)
    fn mesh_size_in_range(&self) -> bool {
        let around = self.elements_around;
        // elements: A + A(U - 1 + E) = A(U + E); nodes: A/2 - 1 + A(U + E)
        let elements = self
            .elements_up
            .checked_add(self.elements_along_stem)
            .and_then(|rows| rows.checked_mul(around));
        let nodes = elements.and_then(|e| e.checked_add(around / 2 - 1));

        matches!((nodes, elements), (Some(n), Some(e)) if n <= MAX_MESH_SIZE && e <= MAX_MESH_SIZE)
    }

    /// Parse a configuration from JSON text. Keys which are absent keep their default values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.update_from_json_str(text)?;
        Ok(config)
    }

    pub fn update_from_json_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let config_json = json::parse(text).map_err(|e| ConfigError::Json(e.to_string()))?;
        self.update_from_json(&config_json)
    }

    /// Overwrite the values present in a JSON object
    ///
    /// ```JSON
    /// {
    ///     "elements along stem": 1,
    ///     "elements around": 12,
    ///     "elements up": 3,
    ///     "identifier": "h1",
    ///     "radius": 1.0,
    ///     "stem length": 0.5
    /// }
    /// ```
    ///
    /// Values of the wrong type are rejected; the config is left untouched in that case.
    pub fn update_from_json(&mut self, config_json: &JsonValue) -> Result<(), ConfigError> {
        if !config_json.is_object() {
            return Err(ConfigError::NotAnObject);
        }

        let mut updated = self.clone();

        if let Some(identifier) = present(config_json, KEY_IDENTIFIER) {
            updated.identifier = identifier
                .as_str()
                .ok_or(ConfigError::NotAString)?
                .to_string();
        }
        for (key, count) in [
            (KEY_ELEMENTS_AROUND, &mut updated.elements_around),
            (KEY_ELEMENTS_UP, &mut updated.elements_up),
            (KEY_ELEMENTS_ALONG_STEM, &mut updated.elements_along_stem),
        ] {
            if let Some(value) = present(config_json, key) {
                *count = value.as_usize().ok_or(ConfigError::NotAnInteger(key))?;
            }
        }
        for (key, real) in [
            (KEY_RADIUS, &mut updated.radius),
            (KEY_STEM_LENGTH, &mut updated.stem_length),
        ] {
            if let Some(value) = present(config_json, key) {
                *real = value
                    .as_f64()
                    .filter(|r| r.is_finite())
                    .ok_or(ConfigError::NotAReal(key))?;
            }
        }

        *self = updated;
        Ok(())
    }

    /// JSON object with keys in sorted order
    pub fn to_json(&self) -> JsonValue {
        object! {
            "elements along stem": self.elements_along_stem,
            "elements around": self.elements_around,
            "elements up": self.elements_up,
            "identifier": self.identifier.as_str(),
            "radius": self.radius,
            "stem length": self.stem_length,
        }
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().pretty(4)
    }
}

fn present<'j>(config_json: &'j JsonValue, key: &str) -> Option<&'j JsonValue> {
    let value = &config_json[key];
    if value.is_null() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = HemisphereConfig::default();
        assert_eq!(config.elements_around, 12);
        assert_eq!(config.elements_up, 3);
        assert_eq!(config.elements_along_stem, 1);
        config.validate().unwrap();
    }

    #[test]
    fn element_count_limits() {
        assert_eq!(
            HemisphereConfig::new(5, 3, 1).validate(),
            Err(ConfigError::ElementsAround(5))
        );
        assert_eq!(
            HemisphereConfig::new(4, 3, 1).validate(),
            Err(ConfigError::ElementsAround(4))
        );
        assert_eq!(
            HemisphereConfig::new(12, 0, 1).validate(),
            Err(ConfigError::ElementsUp(0))
        );
        HemisphereConfig::new(6, 1, 0).validate().unwrap();
        HemisphereConfig::new(8, 1, 0).validate().unwrap();
    }

    #[test]
    fn oversized_meshes_rejected() {
        let config = HemisphereConfig::from_json_str(
            r#"{"elements around": 18446744073709551614, "elements up": 2}"#,
        )
        .unwrap();
        assert_eq!(config.validate(), Err(ConfigError::TooManyElements));

        assert_eq!(
            HemisphereConfig::new(12, usize::MAX, 1).validate(),
            Err(ConfigError::TooManyElements)
        );
        assert_eq!(
            HemisphereConfig::new(1 << 12, 1 << 12, 1).validate(),
            Err(ConfigError::TooManyElements)
        );
        HemisphereConfig::new(1 << 12, 1 << 11, (1 << 11) - 1)
            .validate()
            .unwrap();
    }

    #[test]
    fn parse_full_record() {
        let config = HemisphereConfig::from_json_str(
            r#"{"identifier": "h1", "elements around": 12, "elements up": 3,
                "elements along stem": 1, "radius": 1.0, "stem length": 0.5}"#,
        )
        .unwrap();

        assert_eq!(config.identifier, "h1");
        assert_eq!(config.elements_around, 12);
        assert_eq!(config.elements_up, 3);
        assert_eq!(config.elements_along_stem, 1);
        assert!((config.radius - 1.0).abs() < 1e-15);
        assert!((config.stem_length - 0.5).abs() < 1e-15);
    }

    #[test]
    fn partial_update_keeps_other_values() {
        let mut config = HemisphereConfig::new(8, 2, 0);
        config
            .update_from_json_str(r#"{"identifier": "stem"}"#)
            .unwrap();

        assert_eq!(config.identifier, "stem");
        assert_eq!(config.elements_around, 8);
        assert_eq!(config.elements_up, 2);
    }

    #[test]
    fn reject_bad_values() {
        let mut config = HemisphereConfig::default();

        assert_eq!(
            config.update_from_json_str(r#"{"elements around": "twelve"}"#),
            Err(ConfigError::NotAnInteger(KEY_ELEMENTS_AROUND))
        );
        assert_eq!(
            config.update_from_json_str(r#"{"elements up": -2}"#),
            Err(ConfigError::NotAnInteger(KEY_ELEMENTS_UP))
        );
        assert_eq!(
            config.update_from_json_str(r#"{"elements up": 4, "radius": "big"}"#),
            Err(ConfigError::NotAReal(KEY_RADIUS))
        );
        assert_eq!(
            config.update_from_json_str("[1, 2]"),
            Err(ConfigError::NotAnObject)
        );
        assert!(matches!(
            config.update_from_json_str("{"),
            Err(ConfigError::Json(_))
        ));

        // failed updates leave the config untouched
        assert_eq!(config, HemisphereConfig::default());
    }

    #[test]
    fn json_round_trip() {
        let mut config = HemisphereConfig::new(10, 4, 2);
        config.identifier = String::from("model");

        let text = config.to_json_string();
        assert!(text.find("elements along stem").unwrap() < text.find("identifier").unwrap());
        assert_eq!(HemisphereConfig::from_json_str(&text).unwrap(), config);
    }
}
