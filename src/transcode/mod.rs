//! Transcoding module
//!
//! All decoding and encoding is delegated to an external FFmpeg binary. This
//! module decides which binary to use and which arguments to pass.

mod codec;
mod command;
mod ffmpeg;

pub use codec::{Codec, dnxhd_profile, prores_profile};
pub use command::{EncoderMode, build_args};
pub use ffmpeg::{Ffmpeg, lists_libx264};
