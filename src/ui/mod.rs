//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the engine's read-only views and turns them into cells
//! on the terminal.  No file I/O happens here.

pub mod document_view;
pub mod layout;
pub mod native;
pub mod raster;
pub mod spinner;
pub mod theme;
pub mod track;
