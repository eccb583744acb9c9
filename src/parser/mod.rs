//! Parsers for the gene database, marker lists and exclusion lists.

pub mod annotation;
pub mod excluded;
pub mod markers;
pub mod util;

pub use annotation::{AnnotationRecord, RawRecord};
pub use excluded::{parse_excluded, ExcludedMarkers};
pub use markers::MarkerReader;
