//! volcdef: a database of volcano deformation
//!
//! This crate processes files containing information about volcano
//! deformation, one volcano per file. These can be used, for example, to
//! build a website of observations. The parser produces a [Volcano] record
//! which the rendering and templating modules turn into a textual dump or
//! an HTML page.
//!
//! [Volcano]: record::Volcano

pub mod parsing;
pub mod problem;
pub mod record;
pub mod rendering;
pub mod templating;
