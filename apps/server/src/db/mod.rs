//! Search backend access

pub mod elastic;

pub use elastic::ElasticsearchBackend;
