//! # IO Module
//!
//! Adapter between HTTP clients and the domain services. Translates JSON
//! requests into domain commands and domain results into the `shared` DTOs.

pub mod rest;
