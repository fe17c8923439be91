//! Codec table
//!
//! Maps the codec names accepted in the configuration to containers and
//! codec-specific profile arguments.

use std::fmt;

use serde::Deserialize;

/// Video codec of a proxy
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String")]
pub enum Codec {
    /// H.264 via libx264 or the archive's libopenh264
    H264,
    /// Apple ProRes via prores_ks
    ProRes,
    /// Avid DNxHR
    Dnxhd,
    /// Unknown name, rendered as H.264 with libopenh264
    Other(String),
}

impl From<String> for Codec {
    fn from(name: String) -> Self {
        match name.to_lowercase().as_str() {
            "h264" => Codec::H264,
            "prores" => Codec::ProRes,
            "dnxhd" => Codec::Dnxhd,
            _ => Codec::Other(name),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::H264 => write!(f, "h264"),
            Codec::ProRes => write!(f, "prores"),
            Codec::Dnxhd => write!(f, "dnxhd"),
            Codec::Other(name) => write!(f, "{name}"),
        }
    }
}

impl Codec {
    /// Container the codec is written into when none is configured
    pub fn default_container(&self) -> &'static str {
        match self {
            Codec::H264 => "mp4",
            Codec::ProRes => "mov",
            Codec::Dnxhd => "mxf",
            Codec::Other(_) => "mp4",
        }
    }

    /// Picks the configured container, or the codec default when empty
    pub fn container(&self, custom: &str) -> String {
        if custom.trim().is_empty() {
            self.default_container().to_string()
        } else {
            custom.trim().to_string()
        }
    }
}

/// Numeric `-profile:v` value for prores_ks
///
/// Unknown or empty names select LT.
pub fn prores_profile(name: &str) -> &'static str {
    match name {
        "proxy" => "0",
        "lt" => "1",
        "standard" => "2",
        "hq" => "3",
        _ => "1",
    }
}

/// DNxHR profile, `dnxhr_sq` when none is configured
pub fn dnxhd_profile(name: &str) -> &str {
    if name.is_empty() { "dnxhr_sq" } else { name }
}
