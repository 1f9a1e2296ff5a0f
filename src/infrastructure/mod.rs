pub mod explainers;
pub mod host;
