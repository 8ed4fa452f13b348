//! Video sources and the media element that plays them.
//!
//! Loading runs a [`SourceLoader`](crate::SourceLoader) on a helper thread that reports through
//! two one-shot channels, one for "loaded data" and one for "error".
//! [`MediaElement::loaded_data`](crate::MediaElement::loaded_data) awaits whichever fires first.

pub(crate) mod element;
pub(crate) mod ffmpeg;
pub(crate) mod source;
