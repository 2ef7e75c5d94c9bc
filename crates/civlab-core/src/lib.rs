//! civlab-core: quiz engine, metric banding and content model.
//!
//! This crate holds the logic behind the civlab learning material: the
//! question-bank data model and parser, the stateful quiz engine, the pure
//! slider-to-band functions and the traffic flow animation.

pub mod animation;
pub mod banding;
pub mod config;
pub mod content;
pub mod error;
pub mod model;
pub mod parser;
pub mod quiz;
