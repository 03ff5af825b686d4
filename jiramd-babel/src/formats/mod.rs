//! Format implementations
//!
//! Every format converts between its text representation and the ADF tree.

pub mod adf;
pub mod markdown;
pub mod wiki;

pub use adf::AdfFormat;
pub use markdown::MarkdownFormat;
pub use wiki::WikiFormat;
