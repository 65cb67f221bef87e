pub mod detectors;
pub mod engine;
pub mod file_tree;
pub mod giftwrap;
pub mod host;
pub mod instructions;
pub mod multi_type;
pub mod pipeline;
pub mod resolver;
