//! Render backends. [`CpuRenderer`](crate::CpuRenderer) is the only one.

pub(crate) mod backend;
pub(crate) mod cpu;
