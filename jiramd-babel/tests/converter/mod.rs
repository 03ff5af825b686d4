//! Converter tests
//!
//! Markdown → ADF (import), ADF → Markdown / wiki (export) and round-trip stability.

mod export;
mod import;
mod roundtrip;
