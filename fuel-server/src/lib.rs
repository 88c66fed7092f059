//! Fuel station route search server.
//!
//! A web application that answers: "I'm driving from A to B,
//! where along the way should I stop for fuel?"

pub mod dataset;
pub mod domain;
pub mod engine;
pub mod geo;
pub mod geocode;
pub mod routing;
pub mod web;
