//! Bit-level views over byte streams.
//!
//! Bits go in and out least-significant first: the first bit read from an
//! input byte is `byte & 1`, and the first bit written lands in `byte & 1`
//! of the next output byte.

pub mod reader;
pub mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

/// What `,` yields once the input stream has run dry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EofPolicy {
    /// Keep reading 0 bits
    #[default]
    Zero,
    /// Keep reading 1 bits
    One,
    /// Stop the program with an error
    Fault,
}
