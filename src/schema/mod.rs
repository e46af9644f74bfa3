//! Schema module for ftsearch.
//!
//! This module describes index definitions: the typed attributes that make
//! up an index schema and the index-wide options sent with `FT.CREATE`.
//! Attributes can also be reconstructed from `FT.INFO` metadata.

pub mod attribute;
pub mod builder;
pub mod index;

// Re-export commonly used types
pub use attribute::{
    CoordSystem, DistanceMetric, GeoAttribute, GeometryAttribute, NumericAttribute,
    SchemaAttribute, TagAttribute, TextAttribute, VectorAlgorithm, VectorAttribute,
};
pub use builder::IndexBuilder;
pub use index::{IndexOn, IndexOptions};
