pub mod builder;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod ingest;
pub mod model;
pub mod parsers;
pub mod render;
pub mod tree;
pub mod treemap;
