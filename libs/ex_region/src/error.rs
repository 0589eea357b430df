use thiserror::Error;

/// Non-success statuses of [crate::Region] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("The coordinate field has not been defined; cannot {0}!")]
    FieldNotDefined(&'static str),
    #[error("A coordinate field named '{0}' is already defined!")]
    FieldAlreadyDefined(String),
    #[error("Identifiers start at 1; cannot create {0} with identifier 0!")]
    ZeroIdentifier(&'static str),
    #[error("Node {0} already exists; cannot create it again!")]
    DuplicateNode(usize),
    #[error("Element {0} already exists; cannot define it again!")]
    DuplicateElement(usize),
    #[error("Node {node_id} does not exist; cannot define Element {element_id}!")]
    NodeNotFound { element_id: usize, node_id: usize },
    #[error("The Region has no Elements; cannot define faces!")]
    NoElements,
}
