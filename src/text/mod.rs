//! Text preparation before segmentation.

pub mod annotations;
pub mod normalize;

pub use annotations::{parse_annotated_text, StyledSection};
pub use normalize::normalize_text;
