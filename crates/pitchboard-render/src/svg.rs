//! SVG backend.
//!
//! Writes one self-contained `<svg>` document per frame. Each placed token
//! becomes a `<g class="token">` carrying its id, kind and variant so the
//! output can be inspected or styled without re-parsing paths.

use crate::field;
use crate::paint::{GlyphDescription, Paint, Primitive};
use crate::renderer::{GridStyle, RenderContext, RenderResult, Renderer};
use kurbo::Rect;
use peniko::Color;
use std::fmt::Write;

const SELECTION_PADDING: f64 = 3.0;
const PREVIEW_OPACITY: f64 = 0.6;
const LABEL_FONT_SIZE: f64 = 11.0;

/// Renders frames to SVG markup.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    output: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last frame built.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }

    fn write_frame(&self, ctx: &RenderContext) -> RenderResult<String> {
        let mut out = String::new();
        let size = ctx.viewport_size;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = size.width,
            h = size.height
        )?;
        writeln!(
            out,
            r#"<rect class="background" width="{}" height="{}" {}/>"#,
            size.width,
            size.height,
            fill_attrs(self.background_color(ctx))
        )?;

        let markings = field::markings(ctx.layout, size, ctx.orientation);
        writeln!(
            out,
            r#"<g class="field" data-layout="{}">"#,
            ctx.layout.name()
        )?;
        writeln!(
            out,
            r#"<path d="{}" fill="none" {}/>"#,
            markings.to_svg(),
            stroke_attrs(ctx.line_color, 2.0, None)
        )?;
        out.push_str("</g>\n");

        if ctx.grid_style != GridStyle::None {
            let grid = field::grid(ctx.grid_style, size, ctx.grid_size);
            writeln!(
                out,
                r#"<g class="grid" data-style="{}">"#,
                ctx.grid_style.name().to_lowercase()
            )?;
            match ctx.grid_style {
                GridStyle::Dots => writeln!(
                    out,
                    r#"<path d="{}" {}/>"#,
                    grid.to_svg(),
                    fill_attrs(ctx.grid_color)
                )?,
                _ => writeln!(
                    out,
                    r#"<path d="{}" fill="none" {}/>"#,
                    grid.to_svg(),
                    stroke_attrs(ctx.grid_color, 1.0, None)
                )?,
            }
            out.push_str("</g>\n");
        }

        for token in ctx.tokens {
            let desc = GlyphDescription::for_token(token, ctx.orientation);
            writeln!(
                out,
                r#"<g class="token" data-id="{}" data-kind="{}" data-variant="{}">"#,
                escape(token.id().as_str()),
                desc.kind.name(),
                desc.variant
            )?;
            write_primitives(&mut out, &desc.primitives())?;
            if let Some(number) = desc.label {
                let at = desc.label_position();
                writeln!(
                    out,
                    r#"<text x="{}" y="{}" font-size="{LABEL_FONT_SIZE}" text-anchor="middle" dominant-baseline="central" fill="white">{number}</text>"#,
                    at.x, at.y
                )?;
            }
            if ctx.selected == Some(token.id()) {
                let outline = desc
                    .bounds()
                    .inflate(SELECTION_PADDING, SELECTION_PADDING);
                write_selection(&mut out, outline, ctx.selection_color)?;
            }
            out.push_str("</g>\n");
        }

        if let Some(preview) = &ctx.preview {
            let desc = GlyphDescription::new(
                preview.glyph,
                &preview.color,
                preview.heading,
                preview.position,
                ctx.orientation,
            );
            writeln!(
                out,
                r#"<g class="preview" data-kind="{}" data-variant="{}" opacity="{PREVIEW_OPACITY}">"#,
                desc.kind.name(),
                desc.variant
            )?;
            write_primitives(&mut out, &desc.primitives())?;
            out.push_str("</g>\n");
        }

        out.push_str("</svg>\n");
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;
        self.output = self.write_frame(ctx)?;
        log::debug!(
            "Built SVG frame: {} tokens, {} bytes",
            ctx.tokens.len(),
            self.output.len()
        );
        Ok(())
    }
}

fn write_primitives(out: &mut String, primitives: &[Primitive]) -> std::fmt::Result {
    for primitive in primitives {
        let d = primitive.path.to_svg();
        match &primitive.paint {
            Paint::Fill(color) => writeln!(out, r#"<path d="{d}" {}/>"#, fill_attrs(*color))?,
            Paint::Stroke { color, width, dash } => writeln!(
                out,
                r#"<path d="{d}" fill="none" {}/>"#,
                stroke_attrs(*color, *width, *dash)
            )?,
        }
    }
    Ok(())
}

fn write_selection(out: &mut String, outline: Rect, color: Color) -> std::fmt::Result {
    writeln!(
        out,
        r#"<rect class="selection" x="{}" y="{}" width="{}" height="{}" fill="none" {}/>"#,
        outline.x0,
        outline.y0,
        outline.width(),
        outline.height(),
        stroke_attrs(color, 1.5, Some([4.0, 2.0]))
    )
}

fn rgb(color: Color) -> (String, f64) {
    let c = color.to_rgba8();
    (
        format!("rgb({},{},{})", c.r, c.g, c.b),
        f64::from(c.a) / 255.0,
    )
}

fn fill_attrs(color: Color) -> String {
    let (rgb, alpha) = rgb(color);
    if alpha < 1.0 {
        format!(r#"fill="{rgb}" fill-opacity="{alpha:.3}""#)
    } else {
        format!(r#"fill="{rgb}""#)
    }
}

fn stroke_attrs(color: Color, width: f64, dash: Option<[f64; 2]>) -> String {
    let (rgb, alpha) = rgb(color);
    let mut attrs = format!(r#"stroke="{rgb}" stroke-width="{width}""#);
    if alpha < 1.0 {
        attrs.push_str(&format!(r#" stroke-opacity="{alpha:.3}""#));
    }
    if let Some([on, off]) = dash {
        attrs.push_str(&format!(r#" stroke-dasharray="{on} {off}""#));
    }
    attrs
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
