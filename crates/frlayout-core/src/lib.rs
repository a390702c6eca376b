//! frlayout Core Types and Definitions
//!
//! This crate provides the foundational types shared by the frlayout layout
//! engine and its command-line front end. It includes:
//!
//! - **Geometry**: Vectors, sizes, bounds, and insets ([`geometry`] module)
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Graph**: The host graph model that layouts are written back into ([`graph`] module)

pub mod color;
pub mod geometry;
pub mod graph;
pub mod identifier;
