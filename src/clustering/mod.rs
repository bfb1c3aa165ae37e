//! Clustering support for the detection strategies.

pub mod kmeans;

pub use kmeans::{kmeans, KMeansConfig, KMeansResult};
