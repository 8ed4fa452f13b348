//! Easing curves and the keyed tween timeline that drives the plane fade and content reveal.

pub(crate) mod ease;
pub(crate) mod timeline;
