//! Story template tests: parsing both dialects, rendering, and render/parse stability.

mod parse;
mod render;
mod roundtrip;
