//! Animated GIF transcoding with palette-based color reduction.
//!
//! The sampling, scale, and dither parameters are a fixed policy of this
//! system, not user input: 10 fps, 480 px wide (aspect preserved), lanczos
//! resampling, bayer dithering at scale 5, looping forever.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use tracing::info;

use crate::command::{run_ffmpeg, FfmpegCommand};
use crate::error::{MediaError, MediaResult};

/// Fused palette-generation and palette-application graph.
const SINGLE_PASS_FILTER: &str = "[0:v] fps=10,scale=480:-1:flags=lanczos,format=rgba,split [a][b];\
[a] palettegen=stats_mode=full [p];\
[b][p] paletteuse=dither=bayer:bayer_scale=5";

/// First pass of the two-pass variant: write a standalone palette image.
const PALETTE_GEN_FILTER: &str = "fps=10,scale=480:-1:flags=lanczos,palettegen=stats_mode=full";

/// Second pass: re-read the source and apply the palette.
const PALETTE_USE_FILTER: &str = "[0:v] fps=10,scale=480:-1:flags=lanczos [x];\
[x][1:v] paletteuse=dither=bayer:bayer_scale=5";

/// How the color palette is produced and applied.
///
/// Both strategies produce equivalent output; two-pass exists as a
/// fallback for ffmpeg builds where the fused split/palettegen graph
/// misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteStrategy {
    /// One invocation with a fused split/palettegen/paletteuse graph.
    #[default]
    SinglePass,
    /// Palette image written to scratch, then applied in a second pass.
    TwoPass,
}

impl FromStr for PaletteStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-pass" => Ok(Self::SinglePass),
            "two-pass" => Ok(Self::TwoPass),
            other => Err(format!("unknown palette strategy: {other}")),
        }
    }
}

/// Seam for the job runner; [`GifTranscoder`] is the real implementation.
#[async_trait]
pub trait Transcode: Send + Sync {
    async fn convert(&self, source: &Path, target: &Path) -> MediaResult<()>;
}

/// Converts a video file into a looped animated GIF.
#[derive(Debug, Clone, Default)]
pub struct GifTranscoder {
    strategy: PaletteStrategy,
}

impl GifTranscoder {
    pub fn new(strategy: PaletteStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> PaletteStrategy {
        self.strategy
    }

    async fn convert_single_pass(&self, source: &Path, target: &Path) -> MediaResult<()> {
        let cmd = FfmpegCommand::new(source, target)
            .filter_complex(SINGLE_PASS_FILTER)
            .loop_output(0);
        run_ffmpeg(&cmd).await
    }

    async fn convert_two_pass(&self, source: &Path, target: &Path) -> MediaResult<()> {
        // Palette lives in a private scratch dir, removed on drop.
        let scratch = tempfile::tempdir().map_err(MediaError::Io)?;
        let palette = scratch.path().join("palette.png");

        let gen = FfmpegCommand::new(source, &palette).video_filter(PALETTE_GEN_FILTER);
        run_ffmpeg(&gen).await?;

        let apply = FfmpegCommand::new(source, target)
            .extra_input(&palette)
            .filter_complex(PALETTE_USE_FILTER)
            .loop_output(0);
        run_ffmpeg(&apply).await
    }
}

#[async_trait]
impl Transcode for GifTranscoder {
    async fn convert(&self, source: &Path, target: &Path) -> MediaResult<()> {
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        match self.strategy {
            PaletteStrategy::SinglePass => self.convert_single_pass(source, target).await?,
            PaletteStrategy::TwoPass => self.convert_two_pass(source, target).await?,
        }

        info!(
            "Converted {} to {} ({:?})",
            source.display(),
            target.display(),
            self.strategy
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            "single-pass".parse::<PaletteStrategy>().unwrap(),
            PaletteStrategy::SinglePass
        );
        assert_eq!(
            "two-pass".parse::<PaletteStrategy>().unwrap(),
            PaletteStrategy::TwoPass
        );
        assert!("three-pass".parse::<PaletteStrategy>().is_err());
    }

    #[test]
    fn test_single_pass_argv_carries_fixed_policy() {
        let cmd = FfmpegCommand::new("in.mp4", "out.gif")
            .filter_complex(SINGLE_PASS_FILTER)
            .loop_output(0);
        let args = cmd.build_args();
        let graph = args
            .iter()
            .position(|a| a == "-filter_complex")
            .map(|i| args[i + 1].clone())
            .unwrap();

        assert!(graph.contains("fps=10"));
        assert!(graph.contains("scale=480:-1:flags=lanczos"));
        assert!(graph.contains("palettegen=stats_mode=full"));
        assert!(graph.contains("paletteuse=dither=bayer:bayer_scale=5"));

        let loop_pos = args.iter().position(|a| a == "-loop").unwrap();
        assert_eq!(args[loop_pos + 1], "0");
    }

    #[test]
    fn test_two_pass_filters_agree_on_policy() {
        for filter in [PALETTE_GEN_FILTER, PALETTE_USE_FILTER] {
            assert!(filter.contains("fps=10"));
            assert!(filter.contains("scale=480:-1:flags=lanczos"));
        }
        assert!(PALETTE_GEN_FILTER.contains("palettegen=stats_mode=full"));
        assert!(PALETTE_USE_FILTER.contains("paletteuse=dither=bayer:bayer_scale=5"));
    }
}
