//! Frame sinks: where rendered frames go.

pub(crate) mod sink;
