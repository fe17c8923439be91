//! FFmpeg argument construction

use std::ffi::OsString;
use std::path::Path;

use crate::config::QualityProfile;

use super::codec::{Codec, dnxhd_profile, prores_profile};

/// H.264 encoder available to the selected FFmpeg binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderMode {
    /// libx264, quality driven by CRF, preset and tune
    Libx264,
    /// libopenh264 as bundled with the archive, bitrate driven
    OpenH264,
}

/// Small helper collecting arguments as `OsString`
#[derive(Debug, Default)]
struct Args(Vec<OsString>);

impl Args {
    fn push(&mut self, args: &[&str]) -> &mut Self {
        self.0.extend(args.iter().map(OsString::from));
        self
    }

    fn push_path(&mut self, path: &Path) -> &mut Self {
        self.0.push(path.as_os_str().to_os_string());
        self
    }
}

/// Builds the FFmpeg arguments rendering `input` to `output` with `profile`
///
/// The program name is not included.
pub fn build_args(
    input: &Path,
    output: &Path,
    profile: &QualityProfile,
    mode: EncoderMode,
) -> Vec<OsString> {
    let mut args = Args::default();
    args.push(&["-i"]).push_path(input);

    let scale = format!("scale={}:-2", profile.scale.trim());

    match &profile.codec {
        Codec::H264 => {
            args.push(&["-vf", &scale, "-pix_fmt", "yuv420p"]);
            match mode {
                EncoderMode::Libx264 => {
                    args.push(&[
                        "-c:v",
                        "libx264",
                        "-crf",
                        &profile.crf,
                        "-preset",
                        &profile.preset,
                    ]);
                    if !profile.tune.is_empty() {
                        args.push(&["-tune", &profile.tune]);
                    }
                }
                EncoderMode::OpenH264 => {
                    args.push(&["-c:v", "libopenh264", "-b:v", &profile.video_bitrate]);
                }
            }
            args.push(&[
                "-c:a",
                "aac",
                "-b:a",
                &profile.audio_bitrate,
                "-movflags",
                "+faststart",
            ]);
        }
        Codec::ProRes => {
            args.push(&[
                "-vf",
                &scale,
                "-c:v",
                "prores_ks",
                "-profile:v",
                prores_profile(&profile.codec_profile),
                "-c:a",
                "pcm_s16le",
                "-ar",
                "48000",
            ]);
        }
        Codec::Dnxhd => {
            args.push(&[
                "-vf",
                &scale,
                "-pix_fmt",
                "yuv422p",
                "-c:v",
                "dnxhd",
                "-profile:v",
                dnxhd_profile(&profile.codec_profile),
                "-c:a",
                "pcm_s16le",
                "-ar",
                "48000",
            ]);
        }
        Codec::Other(_) => {
            // Unknown codecs always use the bundled encoder settings
            args.push(&[
                "-vf",
                &scale,
                "-pix_fmt",
                "yuv420p",
                "-c:v",
                "libopenh264",
                "-b:v",
                &profile.video_bitrate,
                "-c:a",
                "aac",
                "-b:a",
                &profile.audio_bitrate,
                "-movflags",
                "+faststart",
            ]);
        }
    }

    args.push(&["-f", &profile.container(), "-loglevel", "error", "-y"])
        .push_path(output);

    args.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QualityProfile;

    fn as_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_h264_openh264() {
        let profile = QualityProfile::preview_defaults();
        let args = as_strings(build_args(
            Path::new("/in/A001.mov"),
            Path::new("/tmp/A001_preview.mp4"),
            &profile,
            EncoderMode::OpenH264,
        ));
        assert_eq!(
            args,
            vec![
                "-i", "/in/A001.mov", "-vf", "scale=320:-2", "-pix_fmt", "yuv420p", "-c:v",
                "libopenh264", "-b:v", "256k", "-c:a", "aac", "-b:a", "64k", "-movflags",
                "+faststart", "-f", "mp4", "-loglevel", "error", "-y", "/tmp/A001_preview.mp4",
            ]
        );
    }

    #[test]
    fn test_h264_libx264_with_tune() {
        let profile = QualityProfile::preview_defaults();
        let args = as_strings(build_args(
            Path::new("in.mov"),
            Path::new("out.mp4"),
            &profile,
            EncoderMode::Libx264,
        ));
        let joined = args.join(" ");
        assert!(joined.contains("-c:v libx264 -crf 28 -preset veryfast -tune fastdecode"));
        assert!(!joined.contains("libopenh264"));
    }

    #[test]
    fn test_h264_libx264_without_tune() {
        let profile = QualityProfile::workflow_defaults();
        let args = as_strings(build_args(
            Path::new("in.mov"),
            Path::new("out.mp4"),
            &profile,
            EncoderMode::Libx264,
        ));
        assert!(!args.contains(&"-tune".to_string()));
        assert!(args.join(" ").contains("-crf 18 -preset medium"));
    }

    #[test]
    fn test_prores() {
        let profile = QualityProfile {
            codec: Codec::ProRes,
            codec_profile: "hq".to_string(),
            ..QualityProfile::workflow_defaults()
        };
        let args = as_strings(build_args(
            Path::new("in.mov"),
            Path::new("out.mov"),
            &profile,
            EncoderMode::Libx264,
        ));
        assert_eq!(
            args,
            vec![
                "-i", "in.mov", "-vf", "scale=1920:-2", "-c:v", "prores_ks", "-profile:v", "3",
                "-c:a", "pcm_s16le", "-ar", "48000", "-f", "mov", "-loglevel", "error", "-y",
                "out.mov",
            ]
        );
    }

    #[test]
    fn test_dnxhd_default_profile() {
        let profile = QualityProfile {
            codec: Codec::Dnxhd,
            ..QualityProfile::workflow_defaults()
        };
        let args = as_strings(build_args(
            Path::new("in.mov"),
            Path::new("out.mxf"),
            &profile,
            EncoderMode::OpenH264,
        ));
        let joined = args.join(" ");
        assert!(joined.contains("-pix_fmt yuv422p -c:v dnxhd -profile:v dnxhr_sq"));
        assert!(joined.contains("-f mxf"));
    }

    #[test]
    fn test_unknown_codec_falls_back_to_openh264() {
        let profile = QualityProfile {
            codec: Codec::Other("vp9".to_string()),
            ..QualityProfile::preview_defaults()
        };
        let args = as_strings(build_args(
            Path::new("in.mov"),
            Path::new("out.mp4"),
            &profile,
            EncoderMode::Libx264,
        ));
        let joined = args.join(" ");
        assert!(joined.contains("-c:v libopenh264 -b:v 256k"));
        assert!(!joined.contains("libx264"));
    }

    #[test]
    fn test_container_override() {
        let profile = QualityProfile {
            container: "mov".to_string(),
            ..QualityProfile::preview_defaults()
        };
        let args = as_strings(build_args(
            Path::new("in.mov"),
            Path::new("out.mov"),
            &profile,
            EncoderMode::OpenH264,
        ));
        assert!(args.join(" ").contains("-f mov -loglevel error -y out.mov"));
    }
}
