//! Standalone scanning primitives for the oxasm assembler.
//!
//! This crate carries no dependencies so external tools (formatters,
//! highlighters, listing generators) can embed the low-level machinery
//! without pulling in the assembler itself. It provides:
//!
//! - [`LineBuffer`]: a sentinel-terminated copy of one logical source line
//! - [`Cursor`]: a `Copy` byte cursor over that buffer
//! - [`ctype`]: character-class predicates for assembly source text
//! - [`Span`]: byte-offset source spans
//!
//! The scanner proper (token classification, keyword resolution, literal
//! conversion) lives in `oxasm_lexer` and is built on top of these types.

pub mod ctype;

mod cursor;
mod line_buffer;
mod span;

pub use cursor::Cursor;
pub use line_buffer::LineBuffer;
pub use span::Span;
