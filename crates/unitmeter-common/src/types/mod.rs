//! Core data types shared across Unitmeter crates

pub mod domain;
