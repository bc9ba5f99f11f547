use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::{FontDescription, Weight};
use tracing::debug;

use crate::error::{ShotError, ShotResult};
use crate::render::{Color, LineStrokeStyle, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Extension trait for renderers that can draw into an external Cairo
/// context, such as a PDF or SVG surface owned by the caller.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> ShotResult<()>;
}

const CLEAR_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);

/// Cairo + Pango + PangoCairo renderer backend.
///
/// `Renderer::render` paints into an owned ARGB32 image surface which can
/// then be written out with [`CairoRenderer::write_png`].
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ShotResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ShotError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Surface sized to the frame viewport.
    pub fn for_frame(frame: &RenderFrame) -> ShotResult<Self> {
        let width = i32::try_from(frame.viewport.width).map_err(|_| {
            ShotError::InvalidViewport {
                width: frame.viewport.width,
                height: frame.viewport.height,
            }
        })?;
        let height = i32::try_from(frame.viewport.height).map_err(|_| {
            ShotError::InvalidViewport {
                width: frame.viewport.width,
                height: frame.viewport.height,
            }
        })?;
        Self::new(width, height)
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png(&self, path: &Path) -> ShotResult<()> {
        let mut file = File::create(path).map_err(|err| ShotError::io(path, err))?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| ShotError::InvalidData(format!("failed to encode png: {err}")))?;
        debug!(path = %path.display(), "png written");
        Ok(())
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ShotResult<()> {
        frame.validate()?;
        apply_color(context, CLEAR_COLOR);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            apply_color(context, rect.fill_color);
            if rect.border_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                apply_color(context, rect.border_color);
                context.set_line_width(rect.border_width);
                apply_dash(context, LineStrokeStyle::Solid, rect.border_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            }
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            apply_dash(context, line.stroke_style, line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for polyline in &frame.polylines {
            let Some(((first_x, first_y), rest)) = polyline.points.split_first() else {
                continue;
            };
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            apply_dash(context, polyline.stroke_style, polyline.stroke_width);
            context.move_to(*first_x, *first_y);
            for (x, y) in rest {
                context.line_to(*x, *y);
            }
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let mut font_description = FontDescription::from_string("Sans");
            font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
            if text.bold {
                font_description.set_weight(Weight::Bold);
            }
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ShotResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ShotResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_dash(context: &Context, style: LineStrokeStyle, stroke_width: f64) {
    let dashes: Vec<f64> = style
        .dash_units()
        .iter()
        .map(|unit| unit * stroke_width)
        .collect();
    context.set_dash(&dashes, 0.0);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ShotError {
    ShotError::InvalidData(format!("{prefix}: {err}"))
}
