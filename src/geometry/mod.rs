//! Cut-line geometry: derived vectors, region classification and output expansion.

pub(crate) mod classify;
pub(crate) mod expansion;
pub(crate) mod params;
