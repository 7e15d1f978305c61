//! # huffcoder
//!
//! Static Huffman coding of byte streams.  The whole input is counted first,
//! a prefix code is derived from the counts, and the input is encoded in one shot.
//!
//! * `static_huff` has the core: frequency count, tree, code table, encoder, decoder
//! * the file level `static_huff::compress` and `static_huff::expand` also persist
//!   the code listing and the bit stream, see `tools::code_listing` and `tools::bit_text`

mod tools;
pub mod static_huff;

pub use tools::code_listing;
pub use tools::node_pool::Node;
pub use tools::bit_text::BitFormat;

type DYNERR = Box<dyn std::error::Error>;

/// Ways decoding can fail
#[derive(thiserror::Error,Debug,PartialEq)]
pub enum DecodeError {
    #[error("stream ends in the middle of a code after {bits} bits")]
    Truncated { bits: usize },
    #[error("there is no tree, but the stream has {bits} bits")]
    NoTree { bits: usize },
    #[error("bit {bit} leads nowhere in the tree")]
    InvalidPath { bit: usize }
}

/// Coder Errors
#[derive(thiserror::Error,Debug,PartialEq)]
pub enum Error {
    #[error("input is empty, cannot build a tree")]
    EmptyInput,
    #[error("symbol {0:#04x} has no code")]
    Encoding(u8),
    #[error("decoding failed: {0}")]
    Decoding(#[from] DecodeError),
    #[error("code for {0:#04x} collides with another code")]
    CodeCollision(u8),
    #[error("code listing is malformed at line {line}")]
    BadCodeListing { line: usize },
    #[error("file format mismatch")]
    FileFormatMismatch,
    #[error("file too large")]
    FileTooLarge
}

/// Options controlling compression
#[derive(Clone)]
pub struct Options {
    /// how the bit stream is stored
    pub format: BitFormat,
    /// return `Error::EmptyInput` rather than writing empty output
    pub require_tree: bool,
    /// return error if file is larger
    pub max_file_size: u64
}

pub const STD_OPTIONS: Options = Options {
    format: BitFormat::Text,
    require_tree: false,
    max_file_size: u32::MAX as u64/8
};
