use crate::exfile::header::HeaderVariant;
#[cfg(feature = "json_export")]
use json::{object, JsonValue};
use smallvec::SmallVec;

/// A bicubic Hermite quadrilateral over four nodes.
///
/// Local node order:
/// ```text
///     3 --------- 4
///     |           |
///     |           |   s2
///     |           |   ^
///     1 --------- 2   |-> s1
/// ```
/// Pole fan elements may repeat a node (nodes 1 and 2 collapse onto one pole cap node); the
/// `header` records how the EX element header must describe them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: usize,
    pub nodes: [usize; 4],
    pub header: HeaderVariant,
}

impl Element {
    pub fn new(id: usize, nodes: [usize; 4], header: HeaderVariant) -> Self {
        Self { id, nodes, header }
    }

    /// Node ids with repeats removed, in local order
    pub fn distinct_nodes(&self) -> SmallVec<[usize; 4]> {
        let mut distinct: SmallVec<[usize; 4]> = SmallVec::new();
        for node_id in self.nodes {
            if !distinct.contains(&node_id) {
                distinct.push(node_id);
            }
        }
        distinct
    }

    /// True if two local nodes refer to the same node
    pub fn is_collapsed(&self) -> bool {
        self.distinct_nodes().len() < 4
    }

    /// Produce a Json Object that describes this Element
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "id": self.id,
            "node_ids": JsonValue::from(self.nodes.to_vec()),
            "header": self.header.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_corners() {
        let fan = Element::new(1, [1, 1, 6, 7], HeaderVariant::Collapsed1);
        assert!(fan.is_collapsed());
        assert_eq!(fan.distinct_nodes().as_slice(), &[1, 6, 7]);

        let regular = Element::new(13, [6, 7, 18, 19], HeaderVariant::Normal);
        assert!(!regular.is_collapsed());
    }
}
