use super::error::RegionError;
use super::field::{CoordinateField, NodeParameters};
use super::write::write_region;

use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Local node index pairs of the four line faces of a square element, in face order:
/// xi1 = 0, xi1 = 1, xi2 = 0, xi2 = 1
const FACE_IDX_DEFS: [[usize; 2]; 4] = [[0, 2], [1, 3], [0, 1], [2, 3]];

/// A 2D square element over four local nodes, interpolated with the bicubic Hermite basis
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquareElement {
    pub id: usize,
    pub nodes: [usize; 4],
    /// Line identifiers of the four faces (filled by [Region::define_all_faces])
    pub faces: Option<[usize; 4]>,
}

/// An in-memory region holding one coordinate field over a nodeset and a 2D mesh.
///
/// Nodes and elements are keyed by caller-supplied identifiers. Once all elements are defined,
/// [Region::define_all_faces] derives the 1D line mesh, after which [Region::write_to_memory]
/// produces the EX text of the whole region.
#[derive(Clone, Debug)]
pub struct Region {
    pub name: String,
    pub(crate) field: Option<CoordinateField>,
    pub(crate) nodes: BTreeMap<usize, NodeParameters>,
    pub(crate) elements: BTreeMap<usize, SquareElement>,
    /// unordered node pair of each line, indexed by line identifier - 1
    pub(crate) lines: Vec<[usize; 2]>,
}

impl Region {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_string(),
            field: None,
            nodes: BTreeMap::new(),
            elements: BTreeMap::new(),
            lines: Vec::new(),
        }
    }

    /// Define the coordinate field carried by every node and element of the Region
    pub fn define_coordinate_field(
        &mut self,
        name: impl AsRef<str>,
        component_names: &[&str],
    ) -> Result<(), RegionError> {
        if let Some(field) = &self.field {
            return Err(RegionError::FieldAlreadyDefined(field.name.clone()));
        }
        log::debug!(
            "Region '{}': defined field '{}' with {} components",
            self.name,
            name.as_ref(),
            component_names.len()
        );
        self.field = Some(CoordinateField::new(name, component_names));
        Ok(())
    }

    pub fn create_node(&mut self, id: usize, params: &NodeParameters) -> Result<(), RegionError> {
        if self.field.is_none() {
            return Err(RegionError::FieldNotDefined("create Nodes"));
        }
        if id == 0 {
            return Err(RegionError::ZeroIdentifier("a Node"));
        }
        if self.nodes.contains_key(&id) {
            return Err(RegionError::DuplicateNode(id));
        }
        self.nodes.insert(id, *params);
        Ok(())
    }

    /// Define a square element over four nodes (local order 1..4). Nodes may repeat (collapsed corners).
    pub fn define_element(&mut self, id: usize, nodes: [usize; 4]) -> Result<(), RegionError> {
        if self.field.is_none() {
            return Err(RegionError::FieldNotDefined("define Elements"));
        }
        if id == 0 {
            return Err(RegionError::ZeroIdentifier("an Element"));
        }
        if let Some(node_id) = nodes.iter().find(|node_id| !self.nodes.contains_key(node_id)) {
            return Err(RegionError::NodeNotFound {
                element_id: id,
                node_id: *node_id,
            });
        }
        if self.elements.contains_key(&id) {
            return Err(RegionError::DuplicateElement(id));
        }

        self.elements.insert(
            id,
            SquareElement {
                id,
                nodes,
                faces: None,
            },
        );
        Ok(())
    }

    /// Derive the line faces of every element. Faces sharing an unordered node pair share one line.
    pub fn define_all_faces(&mut self) -> Result<(), RegionError> {
        if self.elements.is_empty() {
            return Err(RegionError::NoElements);
        }

        // {[node_id_min, node_id_max] => line_id}
        let mut line_ids: BTreeMap<[usize; 2], usize> = BTreeMap::new();
        let mut lines: Vec<[usize; 2]> = Vec::new();

        for element in self.elements.values_mut() {
            let faces: SmallVec<[usize; 4]> = FACE_IDX_DEFS
                .iter()
                .map(|[a, b]| {
                    let (na, nb) = (element.nodes[*a], element.nodes[*b]);
                    let key = [na.min(nb), na.max(nb)];
                    *line_ids.entry(key).or_insert_with(|| {
                        lines.push(key);
                        lines.len()
                    })
                })
                .collect();

            element.faces = Some([faces[0], faces[1], faces[2], faces[3]]);
        }

        log::debug!(
            "Region '{}': defined {} line faces over {} elements",
            self.name,
            lines.len(),
            self.elements.len()
        );
        self.lines = lines;
        Ok(())
    }

    /// Serialize the entire Region as EX text
    pub fn write_to_memory(&self) -> Result<String, RegionError> {
        let field = self
            .field
            .as_ref()
            .ok_or(RegionError::FieldNotDefined("write the Region"))?;
        let buffer = write_region(self, field);
        log::debug!("Region '{}': wrote {} bytes", self.name, buffer.len());
        Ok(buffer)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn element(&self, id: usize) -> Option<&SquareElement> {
        self.elements.get(&id)
    }
}
