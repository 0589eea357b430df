use crate::mesh::HemisphereMesh;

use ex_region::{NodeParameters, Region, RegionError};

/// Name of the coordinate field defined over the mesh
pub const COORDINATE_FIELD: &str = "coordinates";
pub const COORDINATE_COMPONENTS: [&str; 3] = ["x", "y", "z"];

/// The meshing engine operations needed to turn a [HemisphereMesh] into EX text
pub trait MeshEngine {
    fn define_coordinate_field(
        &mut self,
        name: &str,
        component_names: &[&str],
    ) -> Result<(), RegionError>;
    fn create_node(&mut self, id: usize, params: &NodeParameters) -> Result<(), RegionError>;
    fn define_element(&mut self, id: usize, nodes: [usize; 4]) -> Result<(), RegionError>;
    fn define_all_faces(&mut self) -> Result<(), RegionError>;
    fn write_to_memory(&self) -> Result<String, RegionError>;
}

impl MeshEngine for Region {
    fn define_coordinate_field(
        &mut self,
        name: &str,
        component_names: &[&str],
    ) -> Result<(), RegionError> {
        Region::define_coordinate_field(self, name, component_names)
    }

    fn create_node(&mut self, id: usize, params: &NodeParameters) -> Result<(), RegionError> {
        Region::create_node(self, id, params)
    }

    fn define_element(&mut self, id: usize, nodes: [usize; 4]) -> Result<(), RegionError> {
        Region::define_element(self, id, nodes)
    }

    fn define_all_faces(&mut self) -> Result<(), RegionError> {
        Region::define_all_faces(self)
    }

    fn write_to_memory(&self) -> Result<String, RegionError> {
        Region::write_to_memory(self)
    }
}

/// Populate the engine with the mesh's nodes and elements (in mesh order), define the line
/// faces, and return the engine's raw EX text.
pub fn emit_mesh<E: MeshEngine>(engine: &mut E, mesh: &HemisphereMesh) -> Result<String, RegionError> {
    engine.define_coordinate_field(COORDINATE_FIELD, &COORDINATE_COMPONENTS)?;

    for node in mesh.nodes.iter() {
        engine.create_node(node.id, &node.parameters())?;
    }
    log::debug!("Created {} nodes", mesh.num_nodes());

    for element in mesh.elements.iter() {
        engine.define_element(element.id, element.nodes)?;
    }
    log::debug!("Defined {} elements", mesh.num_elements());

    engine.define_all_faces()?;
    engine.write_to_memory()
}
