//! Output formats for laid-out graphs.

pub mod svg;
