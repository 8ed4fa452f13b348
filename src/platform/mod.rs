//! The host page: viewport, autoplay policy, frame clock, and the loop stop flag.

pub(crate) mod host;
pub(crate) mod stop;
