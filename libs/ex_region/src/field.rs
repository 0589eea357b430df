use nalgebra::Vector3;
use std::fmt;

/// Basis description written for every component of a bicubic Hermite coordinate field
pub const BICUBIC_HERMITE_BASIS: &str = "c.Hermite*c.Hermite";

/// Labels of the parameters stored at a node (or referenced by an element's local node)
///
/// `Zero` is only meaningful in element headers: it stands in for a derivative that
/// vanishes at a collapsed corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeValueLabel {
    Value,
    DDs1,
    DDs2,
    D2Ds1Ds2,
    Zero,
}

impl NodeValueLabel {
    /// The four labels carried by every node of a bicubic Hermite field, in storage order
    pub const HERMITE: [Self; 4] = [Self::Value, Self::DDs1, Self::DDs2, Self::D2Ds1Ds2];
}

impl fmt::Display for NodeValueLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::DDs1 => write!(f, "d/ds1"),
            Self::DDs2 => write!(f, "d/ds2"),
            Self::D2Ds1Ds2 => write!(f, "d2/ds1ds2"),
            Self::Zero => write!(f, "zero"),
        }
    }
}

/// A rectangular cartesian coordinate field with one value and three derivatives per node
#[derive(Clone, Debug)]
pub struct CoordinateField {
    pub name: String,
    pub component_names: Vec<String>,
}

impl CoordinateField {
    pub fn new(name: impl AsRef<str>, component_names: &[&str]) -> Self {
        Self {
            name: name.as_ref().to_string(),
            component_names: component_names.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn num_components(&self) -> usize {
        self.component_names.len()
    }
}

/// Position and derivatives at one node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeParameters {
    pub value: Vector3<f64>,
    pub d_ds1: Vector3<f64>,
    pub d_ds2: Vector3<f64>,
    pub d2_ds1ds2: Vector3<f64>,
}

impl NodeParameters {
    /// Parameter vector for a label; `Zero` yields the zero vector
    pub fn get(&self, label: NodeValueLabel) -> Vector3<f64> {
        match label {
            NodeValueLabel::Value => self.value,
            NodeValueLabel::DDs1 => self.d_ds1,
            NodeValueLabel::DDs2 => self.d_ds2,
            NodeValueLabel::D2Ds1Ds2 => self.d2_ds1ds2,
            NodeValueLabel::Zero => Vector3::zeros(),
        }
    }
}
