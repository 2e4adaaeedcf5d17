//! # txtres-editor
//!
//! Extracts localizable text records from game text-resource binaries
//! (length-prefixed records with an ASCII/UTF-16 length ambiguity, opaque
//! header and footer blobs), projects them into CSV tables for editing, and
//! re-encodes edited tables back into a byte-compatible binary.
//!
//! Re-encoding an unedited export with the default selection policy
//! reproduces the original file bit for bit.
pub mod txtres;

// Re-export the main types for convenience
pub use txtres::{
    config::FormatConfig,
    error::{Result, TxtResError},
    models::{Document, Record, TextEncoding, Translation, Variant},
    policy::SelectionPolicy,
    TxtResFile,
};
