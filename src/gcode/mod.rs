//! G-code Module
//!
//! Layer height extraction, calibration command insertion, and file I/O.

pub mod annotate;
pub mod extract;
pub mod io;

pub use annotate::{annotate, format_advance, AnnotatedDocument, SummaryEntry, PAUSE_MARKER};
pub use extract::{detect_height, extract, HeightIndex, HeightLabel, SourceDocument};
pub use io::{read_document, write_document};
