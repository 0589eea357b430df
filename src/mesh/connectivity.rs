use super::element::Element;
use super::{IdTracker, MeshDims, FIRST_IDENTIFIER};
use crate::exfile::header::HeaderVariant;

/// Create every element of the mesh: the pole fan first, then the regular rows.
///
/// The order here is the order of the element records in the EX file, which the header
/// variants are keyed on.
pub fn build_elements(dims: &MeshDims, ids: &mut IdTracker) -> Vec<Element> {
    let mut corners = pole_fan(dims);
    corners.extend(regular_rows(dims));

    corners
        .into_iter()
        .enumerate()
        .map(|(index, nodes)| {
            Element::new(
                ids.next_id(),
                nodes,
                HeaderVariant::for_element(index, dims.around),
            )
        })
        .collect()
}

/// Corner nodes of the `elements around` elements joining the pole cap row to the first
/// hemisphere row.
///
/// With `n` cap nodes and the first hemisphere row starting at node `n + 1`:
/// ```text
///  [1, 1, n+1, n+2]                       collapsed, left seam
///  [k, k+1, n+k+1, n+k+2]                 k = 1..n-1, one side of the cap row
///  [n, n, 2n+1, 2n+2], [n, n, 2n+2, 2n+3] collapsed pair, right seam
///  [n-k+1, n-k, 2n+k+2, 2n+k+3]           k = 1..n-1, back along the other side
///  [1, 1, n+A, n+1]                       collapsed, closes the loop
/// ```
pub fn pole_fan(dims: &MeshDims) -> Vec<[usize; 4]> {
    let n = dims.num_cap_nodes();
    let first = FIRST_IDENTIFIER;
    let row = dims.row_base_node(0);

    let mut fan = Vec::with_capacity(dims.around);

    fan.push([first, first, row, row + 1]);
    for k in 1..n {
        fan.push([k, k + 1, row + k, row + k + 1]);
    }

    fan.push([n, n, row + n, row + n + 1]);
    fan.push([n, n, row + n + 1, row + n + 2]);
    for k in 1..n {
        fan.push([n - k + 1, n - k, row + n + k + 1, row + n + k + 2]);
    }

    fan.push([first, first, row + dims.around - 1, row]);

    fan
}

/// Quad strips between consecutive rows of `elements around` nodes, wrapping around at the seam
pub fn regular_rows(dims: &MeshDims) -> Vec<[usize; 4]> {
    let mut strips = Vec::with_capacity(dims.around * dims.num_regular_rows());

    for er in 0..dims.num_regular_rows() {
        let base = dims.row_base_node(er);
        for ea in 0..dims.around {
            let ea2 = (ea + 1) % dims.around;
            strips.push([
                base + ea,
                base + ea2,
                base + dims.around + ea,
                base + dims.around + ea2,
            ]);
        }
    }

    strips
}
