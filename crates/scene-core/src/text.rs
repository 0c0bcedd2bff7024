//! Typeface fonts and extruded text meshes.
//!
//! Fonts use the typeface JSON layout: a `glyphs` map whose entries carry an
//! advance (`ha`) and an outline string (`o`) of space-separated commands
//! `m x y`, `l x y`, `q x y cx cy` and `b x y c1x c1y c2x c2y` in font units,
//! where curve commands list the end point before the control points.
//! Outlines are flattened into closed contours, the caps are filled with an
//! even-odd rule so counters (the hole in "A") stay open, and side walls join
//! the front and back caps.

use crate::error::FontError;
use crate::geometry::MeshData;
use fnv::FnvHashMap;
use glam::Vec2;
use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};
use lyon::math::point;
use lyon::path::Path;
use serde::Deserialize;
use std::str::SplitWhitespace;

#[derive(Clone, Debug, Deserialize)]
pub struct Glyph {
    pub ha: f32,
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub y_min: f32,
    pub y_max: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    pub glyphs: FnvHashMap<String, Glyph>,
    pub resolution: f32,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub underline_thickness: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextOptions {
    pub size: f32,
    pub depth: f32,
    pub curve_segments: u32,
}

impl Font {
    pub fn from_json(json: &str) -> Result<Self, FontError> {
        Ok(serde_json::from_str(json)?)
    }

    fn glyph(&self, ch: char) -> Result<&Glyph, FontError> {
        let mut buf = [0u8; 4];
        let key: &str = ch.encode_utf8(&mut buf);
        self.glyphs
            .get(key)
            .or_else(|| self.glyphs.get("?"))
            .ok_or(FontError::MissingGlyph(ch))
    }

    /// Flattened closed contours for `text`, in scene units.
    pub fn contours(
        &self,
        text: &str,
        size: f32,
        curve_segments: u32,
    ) -> Result<Vec<Vec<Vec2>>, FontError> {
        let scale = size / self.resolution.max(1.0);
        let line_height =
            (self.bounding_box.y_max - self.bounding_box.y_min + self.underline_thickness) * scale;
        let mut contours = Vec::new();
        let mut offset = Vec2::ZERO;
        for ch in text.chars() {
            if ch == '\n' {
                offset = Vec2::new(0.0, offset.y - line_height);
                continue;
            }
            let glyph = self.glyph(ch)?;
            if let Some(outline) = &glyph.o {
                flatten_outline(outline, scale, offset, curve_segments.max(1), &mut contours)?;
            }
            offset.x += glyph.ha * scale;
        }
        Ok(contours)
    }
}

fn flatten_outline(
    outline: &str,
    scale: f32,
    offset: Vec2,
    segments: u32,
    contours: &mut Vec<Vec<Vec2>>,
) -> Result<(), FontError> {
    let mut tokens = outline.split_whitespace();
    let mut current: Vec<Vec2> = Vec::new();
    while let Some(cmd) = tokens.next() {
        match cmd {
            "m" => {
                close_contour(&mut current, contours);
                current.push(read_point(&mut tokens, cmd, scale, offset)?);
            }
            "l" => current.push(read_point(&mut tokens, cmd, scale, offset)?),
            "q" => {
                let end = read_point(&mut tokens, cmd, scale, offset)?;
                let ctrl = read_point(&mut tokens, cmd, scale, offset)?;
                let start = current.last().copied().unwrap_or(end);
                for j in 1..=segments {
                    let t = j as f32 / segments as f32;
                    let u = 1.0 - t;
                    current.push(start * (u * u) + ctrl * (2.0 * u * t) + end * (t * t));
                }
            }
            "b" => {
                let end = read_point(&mut tokens, cmd, scale, offset)?;
                let c1 = read_point(&mut tokens, cmd, scale, offset)?;
                let c2 = read_point(&mut tokens, cmd, scale, offset)?;
                let start = current.last().copied().unwrap_or(end);
                for j in 1..=segments {
                    let t = j as f32 / segments as f32;
                    let u = 1.0 - t;
                    current.push(
                        start * (u * u * u)
                            + c1 * (3.0 * u * u * t)
                            + c2 * (3.0 * u * t * t)
                            + end * (t * t * t),
                    );
                }
            }
            "z" => close_contour(&mut current, contours),
            other => return Err(FontError::Outline(other.to_string())),
        }
    }
    close_contour(&mut current, contours);
    Ok(())
}

fn read_point(
    tokens: &mut SplitWhitespace<'_>,
    cmd: &str,
    scale: f32,
    offset: Vec2,
) -> Result<Vec2, FontError> {
    let mut coord = || {
        tokens
            .next()
            .and_then(|t| t.parse::<f32>().ok())
            .ok_or_else(|| FontError::Outline(cmd.to_string()))
    };
    let x = coord()?;
    let y = coord()?;
    Ok(Vec2::new(x, y) * scale + offset)
}

fn close_contour(current: &mut Vec<Vec2>, contours: &mut Vec<Vec<Vec2>>) {
    let mut points = std::mem::take(current);
    points.dedup_by(|a, b| a.distance_squared(*b) < 1e-12);
    if points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) < 1e-12 {
        points.pop();
    }
    if points.len() >= 3 {
        contours.push(points);
    }
}

/// Build an extruded mesh for `text`: caps at z = 0 and z = depth.
pub fn text_mesh(font: &Font, text: &str, opts: &TextOptions) -> Result<MeshData, FontError> {
    let contours = font.contours(text, opts.size, opts.curve_segments)?;
    if contours.is_empty() {
        return Ok(MeshData::triangles(Vec::new(), Vec::new()));
    }

    let mut builder = Path::builder();
    for contour in &contours {
        builder.begin(point(contour[0].x, contour[0].y));
        for p in &contour[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut cap: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::default().with_fill_rule(FillRule::EvenOdd),
            &mut BuffersBuilder::new(&mut cap, |v: FillVertex| v.position().to_array()),
        )
        .map_err(FontError::Tessellation)?;

    let mut positions = Vec::new();
    let mut indices = Vec::new();

    // Front cap.
    positions.extend(cap.vertices.iter().map(|v| [v[0], v[1], opts.depth]));
    indices.extend_from_slice(&cap.indices);

    // Back cap, reversed winding.
    let base = positions.len() as u32;
    positions.extend(cap.vertices.iter().map(|v| [v[0], v[1], 0.0]));
    for tri in cap.indices.chunks_exact(3) {
        indices.extend_from_slice(&[base + tri[0], base + tri[2], base + tri[1]]);
    }

    // Side walls.
    for contour in &contours {
        for (i, a) in contour.iter().enumerate() {
            let b = contour[(i + 1) % contour.len()];
            let base = positions.len() as u32;
            positions.extend_from_slice(&[
                [a.x, a.y, 0.0],
                [b.x, b.y, 0.0],
                [b.x, b.y, opts.depth],
                [a.x, a.y, opts.depth],
            ]);
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    Ok(MeshData::triangles(positions, indices))
}
