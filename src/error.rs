use ex_region::RegionError;
use thiserror::Error;

/// Every way a hemisphere model write can fail
#[derive(Error, Debug)]
pub enum HemisphereError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Meshing engine failure: {0}")]
    Engine(#[from] RegionError),
    #[error("Unexpected EX buffer layout: {0}")]
    FormatAssumption(#[from] FormatError),
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HemisphereError>;

/// Rejected configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("'elements around' must be even and at least 6 (got {0})")]
    ElementsAround(usize),
    #[error("'elements up' must be at least 1 (got {0})")]
    ElementsUp(usize),
    #[error(
        "Element counts describe more than {} nodes or elements",
        crate::config::MAX_MESH_SIZE
    )]
    TooManyElements,
    #[error("'{0}' must be a non-negative integer")]
    NotAnInteger(&'static str),
    #[error("'{0}' must be a finite number")]
    NotAReal(&'static str),
    #[error("'identifier' must be a string")]
    NotAString,
    #[error("Configuration must be a JSON object")]
    NotAnObject,
    #[error("Configuration is not valid JSON: {0}")]
    Json(String),
}

/// Mismatches between the raw EX buffer and the layout the rewriter depends on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("No 'Shape. Dimension=2' block found")]
    MissingSurfaceShape,
    #[error("The 2D element block has no field header")]
    MissingElementHeader,
    #[error("The 2D element header has no '#Scale factor sets=0' line")]
    MissingScaleFactorSets,
    #[error("The 2D element header declares no field components")]
    NoComponents,
    #[error("The 2D element header has no basis description for component '{0}'")]
    MissingBasis(String),
    #[error("Component '{component}' declares {found} local nodes; expected 4")]
    LocalNodeCount { component: String, found: usize },
    #[error("Local node {local_node} of component '{component}' is missing its '{line}' line")]
    MissingNodeLine {
        component: String,
        local_node: usize,
        line: &'static str,
    },
    #[error("Expected 2D Element {expected} at position {position}; found '{found}'")]
    UnexpectedElement {
        position: usize,
        expected: usize,
        found: String,
    },
    #[error("Expected {expected} 2D Elements; found {found}")]
    ElementCount { expected: usize, found: usize },
}
