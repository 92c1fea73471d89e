//! Core data types for consensus annotation.
//!
//! - [`Tool`]: the three annotation tools, in trust order
//! - [`GffRecord`]: one row of the nine-column feature table
//! - [`FeatureRecord`]: a tool's normalized prediction, keyed by start coordinate
//! - [`Attributes`]: the ordered `key=value;...` attribute column
//! - [`CategoryTable`]: COG functional categories and their display colors
//!
//! ## Table columns
//!
//! | Column | Example |
//! |--------|---------|
//! | seqname | NC_000913.3 |
//! | source | unknown |
//! | type | CDS |
//! | start | 337 |
//! | end | 2799 |
//! | score | . |
//! | strand | + |
//! | frame | 0 |
//! | attribute | ID=b0002;COG=COG0460;CAT=E;name=thrA;desc=... |
//!
//! [`Tool`]: types::Tool
//! [`GffRecord`]: feature::GffRecord
//! [`FeatureRecord`]: feature::FeatureRecord
//! [`Attributes`]: attributes::Attributes
//! [`CategoryTable`]: category::CategoryTable

pub mod attributes;
pub mod category;
pub mod feature;
pub mod types;
