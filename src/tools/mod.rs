pub mod node_pool;
pub mod bit_text;
pub mod code_listing;
