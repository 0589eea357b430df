/// Element header variants: how collapsed and reversed pole fan elements are described
pub mod header;
/// Substitution of element headers in a raw EX buffer
pub mod rewriter;
/// Line based tokenizer splitting a raw EX buffer into headers and records
pub mod scanner;

pub use header::{ElementHeader, HeaderVariant};
pub use rewriter::{rewrite, SCALE_FACTORS_RECORD};
pub use scanner::{scan, Segment, SegmentKind};
