//! File import and export.

pub mod wav;
