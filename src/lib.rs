extern crate ex_region;
extern crate nalgebra;
extern crate smallvec;

/// Element counts, persistence and validation of a hemisphere model
pub mod config;
/// Driving a meshing engine with the generated nodes and elements
pub mod emitter;
pub mod error;
/// Structural rewriting of the engine's EX text
pub mod exfile;
/// Geometry and connectivity of the hemisphere-with-stem surface mesh
pub mod mesh;
/// The workflow step wrapping model generation
pub mod step;

pub use config::HemisphereConfig;
pub use emitter::{emit_mesh, MeshEngine};
pub use error::{ConfigError, FormatError, HemisphereError, Result};
pub use exfile::HeaderVariant;
pub use mesh::HemisphereMesh;

use ex_region::Region;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name of the region the model is built in
pub const REGION_NAME: &str = "hemisphere";

/// Build the hemisphere model described by `config` and write it as an EX file at `path`
pub fn write_hemisphere_model(path: impl AsRef<Path>, config: &HemisphereConfig) -> Result<()> {
    let mut region = Region::new(REGION_NAME);
    write_hemisphere_model_with(&mut region, path, config)
}

/// Like [write_hemisphere_model], but materializing the mesh in a caller-supplied engine.
///
/// The configuration is validated before the engine is touched. The file only appears at `path`
/// once its complete contents have been written.
pub fn write_hemisphere_model_with<E: MeshEngine>(
    engine: &mut E,
    path: impl AsRef<Path>,
    config: &HemisphereConfig,
) -> Result<()> {
    let path = path.as_ref();
    let text = hemisphere_model_text_with(engine, config)?;

    let tmp_path = temporary_sibling(path);
    if let Err(err) = write_file(&tmp_path, &text).and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    log::info!("Wrote hemisphere model to {}", path.display());
    Ok(())
}

/// The final EX text of the model described by `config`
pub fn hemisphere_model_text(config: &HemisphereConfig) -> Result<String> {
    let mut region = Region::new(REGION_NAME);
    hemisphere_model_text_with(&mut region, config)
}

fn hemisphere_model_text_with<E: MeshEngine>(
    engine: &mut E,
    config: &HemisphereConfig,
) -> Result<String> {
    let mesh = HemisphereMesh::build(config)?;
    log::info!(
        "Hemisphere model: {} nodes, {} elements ({} around, {} up, {} along stem)",
        mesh.num_nodes(),
        mesh.num_elements(),
        mesh.dims.around,
        mesh.dims.up,
        mesh.dims.along_stem
    );

    let raw = emit_mesh(engine, &mesh)?;
    let text = exfile::rewrite(&raw, &mesh.header_variants())?;
    Ok(text)
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, text: &str) -> std::io::Result<()> {
    let f = File::create(path)?;
    let mut w = BufWriter::new(&f);
    w.write_all(text.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ex_region::{NodeParameters, RegionError};

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hemisphere_mesh_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    fn count_2d_elements(text: &str) -> usize {
        let surface = text.find(" Shape. Dimension=2").unwrap();
        text[surface..].matches(" Element: ").count()
    }

    #[test]
    fn deterministic_output() {
        let config = HemisphereConfig::default();
        let path_a = temp_path("deterministic_a.exfile");
        let path_b = temp_path("deterministic_b.exfile");

        write_hemisphere_model(&path_a, &config).unwrap();
        write_hemisphere_model(&path_b, &config).unwrap();
        write_hemisphere_model(&path_a, &config).unwrap();

        assert_eq!(fs::read(&path_a).unwrap(), fs::read(&path_b).unwrap());
        assert!(!temporary_sibling(&path_a).exists());
    }

    #[test]
    fn default_model_headers() {
        let text = hemisphere_model_text(&HemisphereConfig::default()).unwrap();

        // four collapsed variants and the reverse header
        assert_eq!(text.matches("#Scale factor sets=1").count(), 5);
        assert_eq!(text.matches("c.Hermite*c.Hermite, #Scale factors=1").count(), 5);
        // each collapsed variant has two collapsed local nodes in each of the three components
        assert_eq!(text.matches("Value labels: value zero").count(), 4 * 2 * 3);
        // 4 collapsed elements and A/2 - 2 reversed elements
        assert_eq!(text.matches(exfile::SCALE_FACTORS_RECORD).count(), 4 + 4);
    }

    #[test]
    fn default_model_counts() {
        let config = HemisphereConfig::from_json_str(
            r#"{"identifier": "h1", "elements around": 12, "elements up": 3,
                "elements along stem": 1, "radius": 1.0, "stem length": 0.5}"#,
        )
        .unwrap();
        let path = temp_path("h1.exfile");
        write_hemisphere_model(&path, &config).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert_eq!(text.matches(" Node: ").count(), 53);
        assert_eq!(count_2d_elements(&text), 48);
    }

    #[test]
    fn minimal_model() {
        let text = hemisphere_model_text(&HemisphereConfig::new(8, 1, 0)).unwrap();

        assert_eq!(text.matches(" Node: ").count(), 3 + 8);
        assert_eq!(count_2d_elements(&text), 8);
        // no regular rows: the fan is collapsed, plain (once), collapsed, reversed and collapsed
        assert_eq!(text.matches("#Scale factor sets=0").count(), 2);
        assert_eq!(text.matches("#Scale factor sets=1").count(), 5);
    }

    /// Fails the test on any engine call
    struct UntouchedEngine;

    impl MeshEngine for UntouchedEngine {
        fn define_coordinate_field(&mut self, _: &str, _: &[&str]) -> std::result::Result<(), RegionError> {
            panic!("engine used with an invalid configuration")
        }
        fn create_node(&mut self, _: usize, _: &NodeParameters) -> std::result::Result<(), RegionError> {
            panic!("engine used with an invalid configuration")
        }
        fn define_element(&mut self, _: usize, _: [usize; 4]) -> std::result::Result<(), RegionError> {
            panic!("engine used with an invalid configuration")
        }
        fn define_all_faces(&mut self) -> std::result::Result<(), RegionError> {
            panic!("engine used with an invalid configuration")
        }
        fn write_to_memory(&self) -> std::result::Result<String, RegionError> {
            panic!("engine used with an invalid configuration")
        }
    }

    #[test]
    fn odd_elements_around_rejected() {
        let path = temp_path("odd.exfile");
        let result = write_hemisphere_model_with(
            &mut UntouchedEngine,
            &path,
            &HemisphereConfig::new(5, 3, 1),
        );

        assert!(matches!(
            result,
            Err(HemisphereError::InvalidConfiguration(ConfigError::ElementsAround(5)))
        ));
        assert!(!path.exists());
    }

    /// A Region whose EX text is altered (or replaced by an error) on the way out
    struct AlteredOutput<F> {
        region: Region,
        alter: F,
    }

    impl<F> AlteredOutput<F>
    where
        F: Fn(String) -> std::result::Result<String, RegionError>,
    {
        fn new(alter: F) -> Self {
            Self {
                region: Region::new(REGION_NAME),
                alter,
            }
        }
    }

    impl<F> MeshEngine for AlteredOutput<F>
    where
        F: Fn(String) -> std::result::Result<String, RegionError>,
    {
        fn define_coordinate_field(&mut self, name: &str, component_names: &[&str]) -> std::result::Result<(), RegionError> {
            self.region.define_coordinate_field(name, component_names)
        }
        fn create_node(&mut self, id: usize, params: &NodeParameters) -> std::result::Result<(), RegionError> {
            self.region.create_node(id, params)
        }
        fn define_element(&mut self, id: usize, nodes: [usize; 4]) -> std::result::Result<(), RegionError> {
            self.region.define_element(id, nodes)
        }
        fn define_all_faces(&mut self) -> std::result::Result<(), RegionError> {
            self.region.define_all_faces()
        }
        fn write_to_memory(&self) -> std::result::Result<String, RegionError> {
            (self.alter)(self.region.write_to_memory()?)
        }
    }

    #[test]
    fn engine_failure_leaves_no_file() {
        let path = temp_path("engine_failure.exfile");
        let mut engine = AlteredOutput::new(|_| Err(RegionError::NoElements));
        let result = write_hemisphere_model_with(&mut engine, &path, &HemisphereConfig::default());

        assert!(matches!(
            result,
            Err(HemisphereError::Engine(RegionError::NoElements))
        ));
        assert!(!path.exists());
        assert!(!temporary_sibling(&path).exists());
    }

    #[test]
    fn truncated_buffer_leaves_no_file() {
        let path = temp_path("truncated.exfile");
        // drop the last 2D element record
        let mut engine = AlteredOutput::new(|text: String| {
            let last = text.rfind(" Element: ").unwrap();
            Ok(text[..last].to_string())
        });
        let result = write_hemisphere_model_with(&mut engine, &path, &HemisphereConfig::default());

        assert!(matches!(
            result,
            Err(HemisphereError::FormatAssumption(FormatError::ElementCount {
                expected: 48,
                found: 47
            }))
        ));
        assert!(!path.exists());
        assert!(!temporary_sibling(&path).exists());
    }

    #[test]
    fn reordered_buffer_leaves_no_file() {
        let path = temp_path("reordered.exfile");
        let mut engine = AlteredOutput::new(|text: String| {
            Ok(text
                .replacen(" Element: 2 0 0", " Element: X 0 0", 1)
                .replacen(" Element: 3 0 0", " Element: 2 0 0", 1)
                .replacen(" Element: X 0 0", " Element: 3 0 0", 1))
        });
        let result = write_hemisphere_model_with(&mut engine, &path, &HemisphereConfig::default());

        assert!(matches!(
            result,
            Err(HemisphereError::FormatAssumption(FormatError::UnexpectedElement {
                position: 1,
                expected: 2,
                ..
            }))
        ));
        assert!(!path.exists());
        assert!(!temporary_sibling(&path).exists());
    }

    #[test]
    fn oversized_config_rejected() {
        let config = HemisphereConfig::from_json_str(
            r#"{"elements around": 18446744073709551614, "elements up": 2}"#,
        )
        .unwrap();

        assert!(matches!(
            hemisphere_model_text(&config),
            Err(HemisphereError::InvalidConfiguration(ConfigError::TooManyElements))
        ));
    }

    #[test]
    fn unwritable_path() {
        let path = temp_path("missing_dir").join("nested").join("model.exfile");
        let result = write_hemisphere_model(&path, &HemisphereConfig::default());

        assert!(matches!(result, Err(HemisphereError::Io(_))));
        assert!(!path.exists());
        assert!(!temporary_sibling(&path).exists());
    }
}
