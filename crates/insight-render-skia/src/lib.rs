// File: crates/insight-render-skia/src/lib.rs
// Summary: Headless PNG rendering of chart geometry using Skia CPU raster surfaces.

pub mod text;

use std::path::Path;

use insight_chart::{Canvas, GeometryBundle, Insets, Rgb, Theme, XTick, YTick};
use skia_safe as skia;
use tracing::{debug, info};

use crate::text::{Anchor, TextShaper};

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to create a {0}x{1} raster surface")]
    Surface(i32, i32),
    #[error("PNG encoding failed")]
    Encode,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Raster settings. `canvas` must be the one the bundle was laid out on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterOptions {
    pub canvas: Canvas,
    pub insets: Insets,
    pub theme: Theme,
    /// Device pixels per logical unit.
    pub scale: f32,
    pub font_size: f32,
    /// Draw tick labels, legend and title. Off yields shapes only.
    pub draw_labels: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            insets: Insets::default(),
            theme: Theme::default(),
            scale: 2.0,
            font_size: 8.0,
            draw_labels: true,
        }
    }
}

impl RasterOptions {
    /// Output size in device pixels.
    pub fn pixel_size(&self) -> (i32, i32) {
        let s = f64::from(self.scale.max(0.1));
        let w = ((self.canvas.width + self.insets.hsum()) * s).ceil().max(1.0);
        let h = ((self.canvas.height + self.insets.vsum()) * s).ceil().max(1.0);
        (w as i32, h as i32)
    }
}

pub struct SkiaRasterizer {
    opts: RasterOptions,
    text: TextShaper,
}

impl Default for SkiaRasterizer {
    fn default() -> Self {
        Self::new(RasterOptions::default())
    }
}

impl SkiaRasterizer {
    pub fn new(opts: RasterOptions) -> Self {
        Self { opts, text: TextShaper::new() }
    }

    pub fn options(&self) -> &RasterOptions {
        &self.opts
    }

    /// Paint `bundle` and return the encoded PNG.
    pub fn render_to_png_bytes(&self, bundle: &GeometryBundle) -> Result<Vec<u8>, RasterError> {
        let (w, h) = self.opts.pixel_size();
        let mut surface = skia::surfaces::raster_n32_premul((w, h)).ok_or(RasterError::Surface(w, h))?;
        self.paint(surface.canvas(), bundle);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(RasterError::Encode)?;
        debug!(width = w, height = h, bytes = data.as_bytes().len(), "encoded chart PNG");
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG file, creating parent directories as needed.
    pub fn render_to_png(&self, bundle: &GeometryBundle, output_png_path: impl AsRef<Path>) -> Result<(), RasterError> {
        let bytes = self.render_to_png_bytes(bundle)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        info!(path = %path.display(), title = bundle.title(), "wrote chart PNG");
        Ok(())
    }

    fn paint(&self, canvas: &skia::Canvas, bundle: &GeometryBundle) {
        let o = &self.opts;
        canvas.clear(color(o.theme.background));
        canvas.scale((o.scale, o.scale));
        canvas.translate((o.insets.left as f32, o.insets.top as f32));

        if o.draw_labels && !bundle.title().is_empty() {
            self.text.draw(
                canvas,
                bundle.title(),
                (0.0, -(o.insets.top as f32) + o.font_size * 1.5),
                Anchor::Start,
                o.font_size * 1.25,
                color(o.theme.title),
                false,
                true,
            );
        }

        match bundle {
            GeometryBundle::Histogram { bars, x_ticks, y_ticks, .. } => {
                self.draw_y_axis(canvas, y_ticks);
                let mut fill = skia::Paint::default();
                fill.set_anti_alias(true);
                fill.set_style(skia::paint::Style::Fill);
                for b in bars {
                    fill.set_color(color(b.color));
                    let rect = skia::Rect::from_xywh(b.x as f32, b.y as f32, b.width as f32, b.height as f32);
                    canvas.draw_round_rect(rect, 2.0, 2.0, &fill);
                }
                self.draw_x_axis(canvas, x_ticks);
            }
            GeometryBundle::Pie { segments, radius, circumference, .. } => {
                let cx = (o.canvas.width / 2.0) as f32;
                let cy = (o.canvas.height / 2.0) as f32;
                let r = *radius as f32;
                let stroke = r / 3.0;

                let mut ring = skia::Paint::default();
                ring.set_anti_alias(true);
                ring.set_style(skia::paint::Style::Stroke);
                ring.set_stroke_width(stroke);
                ring.set_color(color(o.theme.pie_track));
                canvas.draw_circle((cx, cy), r, &ring);

                let oval = skia::Rect::from_ltrb(cx - r, cy - r, cx + r, cy + r);
                for s in segments {
                    let sweep = s.sweep_degrees(*circumference) as f32;
                    if sweep <= 0.0 {
                        continue;
                    }
                    ring.set_color(color(s.color));
                    // Arcs start at 12 o'clock and run clockwise.
                    let start = s.start_degrees(*circumference) as f32 - 90.0;
                    canvas.draw_arc(oval, start, sweep, false, &ring);
                }

                if o.draw_labels {
                    let mut swatch = skia::Paint::default();
                    swatch.set_anti_alias(true);
                    let lx = cx + r + stroke;
                    let box_size = o.font_size * 0.8;
                    let text_x = lx + o.font_size * 1.2;
                    // Labels end at the right edge of the surface.
                    let room = (o.canvas.width + o.insets.right) as f32 - text_x;
                    for (k, s) in segments.iter().enumerate() {
                        let ly = o.font_size * 1.5 * k as f32;
                        swatch.set_color(color(s.color));
                        canvas.draw_rect(skia::Rect::from_xywh(lx, ly, box_size, box_size), &swatch);
                        let label = self.text.fit(&s.label, room, o.font_size);
                        self.text.draw(
                            canvas,
                            &label,
                            (text_x, ly + box_size),
                            Anchor::Start,
                            o.font_size,
                            color(o.theme.axis_label),
                            false,
                            false,
                        );
                    }
                }
            }
            GeometryBundle::Line { paths, x_ticks, y_ticks, .. } => {
                self.draw_y_axis(canvas, y_ticks);
                let mut stroke = skia::Paint::default();
                stroke.set_anti_alias(true);
                stroke.set_style(skia::paint::Style::Stroke);
                stroke.set_stroke_width(2.0);
                stroke.set_stroke_join(skia::paint::Join::Round);
                for p in paths {
                    let Some((&(x0, y0), rest)) = p.points.split_first() else { continue };
                    stroke.set_color(color(p.color));
                    if rest.is_empty() {
                        // A lone move draws nothing; mark the point instead.
                        let mut dot = stroke.clone();
                        dot.set_style(skia::paint::Style::Fill);
                        canvas.draw_circle((x0 as f32, y0 as f32), 1.5, &dot);
                        continue;
                    }
                    let mut path = skia::Path::new();
                    path.move_to((x0 as f32, y0 as f32));
                    for &(x, y) in rest {
                        path.line_to((x as f32, y as f32));
                    }
                    canvas.draw_path(&path, &stroke);
                }
                self.draw_x_axis(canvas, x_ticks);
            }
        }
    }

    fn draw_y_axis(&self, canvas: &skia::Canvas, ticks: &[YTick]) {
        let o = &self.opts;
        let w = o.canvas.width as f32;
        let h = o.canvas.height as f32;

        let mut grid = skia::Paint::default();
        grid.set_anti_alias(true);
        grid.set_stroke_width(0.5);
        grid.set_color(color(o.theme.grid));
        for tick in ticks {
            let y = tick.y as f32;
            canvas.draw_line((0.0, y), (w, y), &grid);
            if o.draw_labels {
                self.text.draw(
                    canvas,
                    &tick.value.to_string(),
                    (-3.0, y + o.font_size * 0.35),
                    Anchor::End,
                    o.font_size,
                    color(o.theme.axis_label),
                    true,
                    false,
                );
            }
        }

        let mut axis = skia::Paint::default();
        axis.set_anti_alias(true);
        axis.set_stroke_width(1.0);
        axis.set_color(color(o.theme.axis_line));
        canvas.draw_line((0.0, h), (w, h), &axis);
    }

    fn draw_x_axis(&self, canvas: &skia::Canvas, ticks: &[XTick]) {
        let o = &self.opts;
        if !o.draw_labels {
            return;
        }
        let baseline = o.canvas.height as f32 + o.font_size * 1.4;
        for tick in ticks {
            self.text.draw(
                canvas,
                &tick.label,
                (tick.x as f32, baseline),
                Anchor::Middle,
                o.font_size,
                color(o.theme.axis_label),
                false,
                false,
            );
        }
    }
}

fn color(c: Rgb) -> skia::Color {
    skia::Color::from_rgb(c.r, c.g, c.b)
}
