use std::fs;
use std::path::Path;

use tracing::info;

use crate::chart::{ChartStyle, build_chart_frame};
use crate::core::PlotModel;
use crate::error::{ShotError, ShotResult};
use crate::render::{NullRenderer, RenderFrame, Renderer};

/// File format written by [`export_chart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Raster image; needs the `cairo-backend` feature.
    #[default]
    Png,
    /// The validated render frame as pretty JSON.
    FrameJson,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::FrameJson => "frame.json",
        }
    }
}

/// Builds the frame for `model` and writes it to `path` as `format`.
pub fn export_chart(
    model: &PlotModel,
    style: &ChartStyle,
    format: OutputFormat,
    path: &Path,
) -> ShotResult<RenderFrame> {
    let frame = build_chart_frame(model, style)?;
    match format {
        OutputFormat::Png => write_png(&frame, path)?,
        OutputFormat::FrameJson => {
            NullRenderer::default().render(&frame)?;
            let json = frame.to_json_pretty()?;
            fs::write(path, json).map_err(|err| ShotError::io(path, err))?;
        }
    }
    info!(path = %path.display(), format = format.extension(), "chart exported");
    Ok(frame)
}

#[cfg(feature = "cairo-backend")]
fn write_png(frame: &RenderFrame, path: &Path) -> ShotResult<()> {
    let mut renderer = crate::render::CairoRenderer::for_frame(frame)?;
    renderer.render(frame)?;
    renderer.write_png(path)
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_frame: &RenderFrame, _path: &Path) -> ShotResult<()> {
    Err(ShotError::BackendUnavailable(
        "png output requires the `cairo-backend` feature",
    ))
}
