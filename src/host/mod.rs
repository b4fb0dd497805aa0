//! Plugin-host surface: fixed-point parameter decoding and lifecycle command dispatch.

pub(crate) mod command;
pub(crate) mod params;
