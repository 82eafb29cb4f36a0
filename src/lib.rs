//! Castcard - casting video card script assistant
//!
//! Interviews an actor through a fixed sequence of questions, turns the
//! answers into an instruction for a text generation backend, and releases
//! the generated card text only when it passes a strict structural and
//! rhythmic validator.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
