//! mxdraft Core Types and Definitions
//!
//! This crate provides the foundational types shared by every mxdraft crate.
//! It includes:
//!
//! - **Identifiers**: Interned cell identifiers and the document-scoped
//!   allocator ([`identifier`] module)
//! - **Geometry**: Vertex bounds and edge geometry markers ([`geometry`] module)
//! - **Styles**: Opaque presentation strings, the category registry, and a
//!   typed builder ([`style`] module)
//! - **Cells**: The vertex / container / edge cell model ([`cell`] module)

pub mod cell;
pub mod geometry;
pub mod identifier;
pub mod style;
