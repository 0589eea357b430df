use super::node::Node;
use super::{IdTracker, MeshDims};

use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI};

/// Share of a hemisphere row step spanned (per side) by the pole cap row
pub const FIRST_ROW_FRACTION: f64 = 0.75;

/// Angular steps shared by the three regions
#[derive(Clone, Copy, Debug)]
pub struct AngularSteps {
    pub per_element_around: f64,
    pub per_element_up: f64,
}

impl AngularSteps {
    pub fn new(dims: &MeshDims) -> Self {
        Self {
            per_element_around: 2.0 * PI / dims.around as f64,
            per_element_up: FRAC_PI_2 / dims.up as f64,
        }
    }
}

/// Create every node of the mesh: the pole cap row, then hemisphere rows moving away from the
/// pole, then the stem rows.
pub fn build_nodes(dims: &MeshDims, ids: &mut IdTracker) -> Vec<Node> {
    let steps = AngularSteps::new(dims);
    let mut nodes = Vec::with_capacity(dims.num_nodes());

    pole_cap_row(dims, &steps, ids, &mut nodes);
    hemisphere_rows(dims, &steps, ids, &mut nodes);
    stem_rows(dims, &steps, ids, &mut nodes);

    nodes
}

/// The row of nodes lying across the pole in the y = 0 plane.
///
/// The pull towards the pole (d/ds2) is a full hemisphere row step at the center of the row and
/// blends down to the smaller, scaled node step at its ends.
fn pole_cap_row(dims: &MeshDims, steps: &AngularSteps, ids: &mut IdTracker, nodes: &mut Vec<Node>) {
    let num_cap = dims.num_cap_nodes();
    let center = num_cap / 2;

    let radians_per_node =
        4.0 * FIRST_ROW_FRACTION * steps.per_element_up / dims.around as f64;
    let radians_per_node_scaled =
        radians_per_node * (1.0 + num_cap as f64) / num_cap as f64 / FIRST_ROW_FRACTION;

    for na in 0..num_cap {
        let offset = na as f64 - center as f64;
        let f1 = offset.abs() / center as f64;
        let f2 = 1.0 - f1;

        let (sin_x, cos_x) = (offset * radians_per_node).sin_cos();

        nodes.push(Node::new(
            ids.next_id(),
            Vector3::new(sin_x, 0.0, -cos_x),
            Vector3::new(radians_per_node * cos_x, 0.0, radians_per_node * sin_x),
            Vector3::new(
                0.0,
                -(f1 * radians_per_node_scaled + f2 * steps.per_element_up),
                0.0,
            ),
        ));
    }
}

fn hemisphere_rows(dims: &MeshDims, steps: &AngularSteps, ids: &mut IdTracker, nodes: &mut Vec<Node>) {
    for nu in 0..dims.up {
        let (sin_up, cos_up) = ((nu + 1) as f64 * steps.per_element_up).sin_cos();

        for na in 0..dims.around {
            let (sin_around, cos_around) = (na as f64 * steps.per_element_around).sin_cos();

            nodes.push(Node::new(
                ids.next_id(),
                Vector3::new(-cos_around * sin_up, -sin_around * sin_up, -cos_up),
                Vector3::new(
                    sin_around * sin_up * steps.per_element_around,
                    -cos_around * sin_up * steps.per_element_around,
                    0.0,
                ),
                Vector3::new(
                    -cos_around * cos_up * steps.per_element_up,
                    -sin_around * cos_up * steps.per_element_up,
                    sin_up * steps.per_element_up,
                ),
            ));
        }
    }
}

/// Unit radius cylinder rows above the equator; each row is one hemisphere row step long
fn stem_rows(dims: &MeshDims, steps: &AngularSteps, ids: &mut IdTracker, nodes: &mut Vec<Node>) {
    for ne in 0..dims.along_stem {
        let z = (ne + 1) as f64 * steps.per_element_up;

        for na in 0..dims.around {
            let (sin_around, cos_around) = (na as f64 * steps.per_element_around).sin_cos();

            nodes.push(Node::new(
                ids.next_id(),
                Vector3::new(-cos_around, -sin_around, z),
                Vector3::new(
                    sin_around * steps.per_element_around,
                    -cos_around * steps.per_element_around,
                    0.0,
                ),
                Vector3::new(0.0, 0.0, steps.per_element_up),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HemisphereConfig;
    use crate::mesh::FIRST_IDENTIFIER;
    use approx::assert_abs_diff_eq;

    fn nodes_for(around: usize, up: usize, along_stem: usize) -> (MeshDims, Vec<Node>) {
        let dims = MeshDims::from_config(&HemisphereConfig::new(around, up, along_stem)).unwrap();
        let nodes = build_nodes(&dims, &mut IdTracker::new(FIRST_IDENTIFIER));
        (dims, nodes)
    }

    #[test]
    fn unit_radius() {
        let (dims, nodes) = nodes_for(12, 3, 2);
        let num_cap = dims.num_cap_nodes();
        let num_hemisphere = dims.around * dims.up;

        for node in nodes.iter().take(num_cap + num_hemisphere) {
            assert_abs_diff_eq!(node.coords.norm(), 1.0, epsilon = 1e-12);
        }
        for node in nodes.iter().skip(num_cap + num_hemisphere) {
            assert_abs_diff_eq!(node.coords.xy().norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn tangent_frames() {
        let (dims, nodes) = nodes_for(16, 4, 1);

        for node in nodes.iter().take(dims.num_cap_nodes() + dims.around * dims.up) {
            // both derivatives lie in the tangent plane of the unit sphere
            assert_abs_diff_eq!(node.d_ds1.dot(&node.coords), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(node.d_ds2.dot(&node.coords), 0.0, epsilon = 1e-12);
            assert!(node.d_ds1.cross(&node.d_ds2).norm() > 1e-6);
            assert_eq!(node.d2_ds1ds2, Vector3::zeros());
        }
    }

    #[test]
    fn pole_cap_fan() {
        let (dims, nodes) = nodes_for(12, 3, 1);
        let steps = AngularSteps::new(&dims);
        let radians_per_node = 4.0 * FIRST_ROW_FRACTION * steps.per_element_up / 12.0;
        let scaled = radians_per_node * 6.0 / 5.0 / FIRST_ROW_FRACTION;

        // center node sits on the pole
        assert_abs_diff_eq!(nodes[2].coords, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-15);
        assert_abs_diff_eq!(nodes[2].d_ds2.y, -steps.per_element_up, epsilon = 1e-15);
        assert_abs_diff_eq!(nodes[1].d_ds2.y, -(0.5 * scaled + 0.5 * steps.per_element_up), epsilon = 1e-15);
        assert_abs_diff_eq!(nodes[0].d_ds2.y, -scaled, epsilon = 1e-15);
        // the pull is strongest at the center
        assert!(nodes[0].d_ds2.norm() < nodes[1].d_ds2.norm());
        assert!(nodes[1].d_ds2.norm() < nodes[2].d_ds2.norm());

        // symmetric about the center
        assert_abs_diff_eq!(nodes[0].coords.x, -nodes[4].coords.x, epsilon = 1e-15);
        assert_abs_diff_eq!(nodes[1].d_ds2, nodes[3].d_ds2, epsilon = 1e-15);
        for node in nodes.iter().take(5) {
            assert_eq!(node.coords.y, 0.0);
            assert_abs_diff_eq!(node.d_ds1.norm(), radians_per_node, epsilon = 1e-15);
        }
    }

    #[test]
    fn first_hemisphere_row() {
        let (dims, nodes) = nodes_for(12, 3, 1);
        let steps = AngularSteps::new(&dims);
        let first = &nodes[dims.num_cap_nodes()];

        assert_eq!(first.id, 6);
        let (sin_up, cos_up) = steps.per_element_up.sin_cos();
        assert_abs_diff_eq!(first.coords, Vector3::new(-sin_up, 0.0, -cos_up), epsilon = 1e-15);
        assert_abs_diff_eq!(
            first.d_ds1,
            Vector3::new(0.0, -sin_up * steps.per_element_around, 0.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn stem_rows_extend_past_equator() {
        let (dims, nodes) = nodes_for(8, 2, 3);
        let steps = AngularSteps::new(&dims);
        let stem_start = dims.row_base_node(dims.up) - 1;

        for (ne, row) in nodes[stem_start..].chunks(dims.around).enumerate() {
            for node in row {
                assert_abs_diff_eq!(node.coords.z, (ne + 1) as f64 * steps.per_element_up, epsilon = 1e-15);
                assert_eq!(node.d_ds2, Vector3::new(0.0, 0.0, steps.per_element_up));
            }
        }
        assert_eq!(nodes.len() - stem_start, 3 * 8);
    }
}
