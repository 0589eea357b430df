use ex_region::NodeParameters;
#[cfg(feature = "json_export")]
use json::{array, object, JsonValue};
use nalgebra::Vector3;

/// A point on the hemisphere surface with its bicubic Hermite parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: usize,
    pub coords: Vector3<f64>,
    /// derivative around the hemisphere (or along the pole cap row)
    pub d_ds1: Vector3<f64>,
    /// derivative up the hemisphere towards the stem
    pub d_ds2: Vector3<f64>,
    pub d2_ds1ds2: Vector3<f64>,
}

impl Node {
    pub fn new(id: usize, coords: Vector3<f64>, d_ds1: Vector3<f64>, d_ds2: Vector3<f64>) -> Self {
        Self {
            id,
            coords,
            d_ds1,
            d_ds2,
            d2_ds1ds2: Vector3::zeros(),
        }
    }

    pub fn parameters(&self) -> NodeParameters {
        NodeParameters {
            value: self.coords,
            d_ds1: self.d_ds1,
            d_ds2: self.d_ds2,
            d2_ds1ds2: self.d2_ds1ds2,
        }
    }

    /// Produce a Json Object that describes this Node
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "id": self.id,
            "x": vector_json(&self.coords),
            "d_ds1": vector_json(&self.d_ds1),
            "d_ds2": vector_json(&self.d_ds2),
            "d2_ds1ds2": vector_json(&self.d2_ds1ds2),
        }
    }
}

#[cfg(feature = "json_export")]
fn vector_json(v: &Vector3<f64>) -> JsonValue {
    array![v.x, v.y, v.z]
}
