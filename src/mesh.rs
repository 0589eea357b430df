/// Element to node connectivity of the pole fan and the regular rows
pub mod connectivity;
/// A bicubic Hermite quadrilateral, possibly with collapsed corners
pub mod element;
/// Node positions and derivatives for the pole cap, hemisphere and stem
pub mod geometry;
/// A point on the surface with its Hermite parameters
pub mod node;

use crate::config::HemisphereConfig;
use crate::error::ConfigError;
use crate::exfile::header::HeaderVariant;
use element::Element;
use node::Node;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};
#[cfg(feature = "json_export")]
use std::fs::File;
#[cfg(feature = "json_export")]
use std::io::BufWriter;

/// Node and Element identifiers both start here
pub const FIRST_IDENTIFIER: usize = 1;

/// Element counts of the three mesh regions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshDims {
    pub around: usize,
    pub up: usize,
    pub along_stem: usize,
}

impl MeshDims {
    /// Validated element counts of a configuration
    pub fn from_config(config: &HemisphereConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            around: config.elements_around,
            up: config.elements_up,
            along_stem: config.elements_along_stem,
        })
    }

    /// Nodes in the row straddling the pole
    pub fn num_cap_nodes(&self) -> usize {
        self.around / 2 - 1
    }

    pub fn num_nodes(&self) -> usize {
        self.num_cap_nodes() + self.around * (self.up + self.along_stem)
    }

    /// Rows of elements with plain quad-strip connectivity (every hemisphere row but the first, and the stem)
    pub fn num_regular_rows(&self) -> usize {
        self.up - 1 + self.along_stem
    }

    pub fn num_elements(&self) -> usize {
        self.around + self.around * self.num_regular_rows()
    }

    /// Identifier of the first node of hemisphere row `row` (row 0 borders the pole fan)
    pub fn row_base_node(&self, row: usize) -> usize {
        FIRST_IDENTIFIER + self.num_cap_nodes() + row * self.around
    }
}

/// A sequential identifier counter threaded through the mesh builders
pub struct IdTracker {
    next_id: usize,
}

impl IdTracker {
    pub fn new(start: usize) -> Self {
        Self { next_id: start }
    }

    pub fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id - 1
    }
}

/// The complete hemisphere-with-stem surface mesh: nodes in creation order followed by elements
/// in the order they must be defined (and appear) in the EX file.
#[derive(Debug, Clone)]
pub struct HemisphereMesh {
    pub dims: MeshDims,
    pub nodes: Vec<Node>,
    pub elements: Vec<Element>,
}

impl HemisphereMesh {
    /// Validate the configuration and build node geometry and element connectivity
    pub fn build(config: &HemisphereConfig) -> Result<Self, ConfigError> {
        let dims = MeshDims::from_config(config)?;

        let mut node_ids = IdTracker::new(FIRST_IDENTIFIER);
        let nodes = geometry::build_nodes(&dims, &mut node_ids);

        let mut element_ids = IdTracker::new(FIRST_IDENTIFIER);
        let elements = connectivity::build_elements(&dims, &mut element_ids);

        debug_assert_eq!(nodes.len(), dims.num_nodes());
        debug_assert_eq!(elements.len(), dims.num_elements());

        Ok(Self {
            dims,
            nodes,
            elements,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Retrieve a Node by its (1-based) identifier
    pub fn node(&self, id: usize) -> Option<&Node> {
        id.checked_sub(FIRST_IDENTIFIER)
            .and_then(|idx| self.nodes.get(idx))
    }

    /// Header variant of every element, in element order
    pub fn header_variants(&self) -> Vec<HeaderVariant> {
        self.elements.iter().map(|element| element.header).collect()
    }

    /// Print the mesh to a JSON file specified by path.
    #[cfg(feature = "json_export")]
    pub fn export_to_json(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let f = File::create(path.as_ref())?;
        let mut w = BufWriter::new(&f);

        let mesh_object = object! {
            "Elements around": self.dims.around,
            "Elements up": self.dims.up,
            "Elements along stem": self.dims.along_stem,
            "Nodes": JsonValue::from(self.nodes.iter().map(|node| node.to_json()).collect::<Vec<_>>()),
            "Elements": JsonValue::from(self.elements.iter().map(|element| element.to_json()).collect::<Vec<_>>()),
        };

        mesh_object.write_pretty(&mut w, 4)?;

        Ok(())
    }
}
