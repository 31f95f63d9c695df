use gl::types::*;
use glam::{Mat4, Vec3};
use std::mem;

use crate::error::GfxError;
use crate::renderer::shader::ShaderProgram;

const QUAD_VERT_SRC: &str = include_str!("../../shaders/quad.vert");
const QUAD_FRAG_SRC: &str = include_str!("../../shaders/quad.frag");

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
/// Horizontal advance per character in font pixels (glyph + 1px gap).
pub const ADVANCE: f32 = 6.0;
/// Line height in font pixels; matches an 8px cell.
pub const CELL_HEIGHT: f32 = 8.0;

/// 5x7 bitmap for `c`, one row per byte, bit 4 is the leftmost column.
/// Lowercase letters are drawn as uppercase.
#[rustfmt::skip]
pub fn glyph(c: char) -> [u8; GLYPH_HEIGHT] {
    match c.to_ascii_uppercase() {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '>' => [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '°' => [0x0C, 0x12, 0x12, 0x0C, 0x00, 0x00, 0x00],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    }
}

/// Width of `text` in screen pixels at `scale`.
pub fn measure_text(text: &str, scale: f32) -> f32 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    (chars as f32 * ADVANCE - 1.0) * scale
}

/// Two triangles (x, y pairs) per lit font pixel, top-left origin.
pub fn text_vertices(text: &str, x: f32, y: f32, scale: f32) -> Vec<f32> {
    let mut out = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let origin_x = x + i as f32 * ADVANCE * scale;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let px = origin_x + col as f32 * scale;
                let py = y + row as f32 * scale;
                out.extend_from_slice(&rect_vertices(px, py, scale, scale));
            }
        }
    }
    out
}

#[rustfmt::skip]
fn rect_vertices(x: f32, y: f32, w: f32, h: f32) -> [f32; 12] {
    [
        x,     y,
        x + w, y,
        x + w, y + h,
        x,     y,
        x + w, y + h,
        x,     y + h,
    ]
}

/// Screen-space text and flat rectangles, drawn with an orthographic projection.
/// Caller sets up blend state.
pub struct TextRenderer {
    shader: ShaderProgram,
    vao: GLuint,
    vbo: GLuint,
}

impl TextRenderer {
    pub fn new() -> Result<Self, GfxError> {
        let shader = ShaderProgram::from_sources(QUAD_VERT_SRC, QUAD_FRAG_SRC)?;

        let mut vao: GLuint = 0;
        let mut vbo: GLuint = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            let stride = (2 * mem::size_of::<f32>()) as GLsizei;
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, stride, std::ptr::null());

            gl::BindVertexArray(0);
        }

        Ok(Self { shader, vao, vbo })
    }

    pub fn measure_text(&self, text: &str, scale: f32) -> f32 {
        measure_text(text, scale)
    }

    pub fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        scale: f32,
        color: Vec3,
        projection: &Mat4,
    ) {
        let vertices = text_vertices(text, x, y, scale);
        self.draw_triangles(&vertices, color.extend(1.0).to_array(), projection);
    }

    pub fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: [f32; 4],
        projection: &Mat4,
    ) {
        self.draw_triangles(&rect_vertices(x, y, w, h), color, projection);
    }

    fn draw_triangles(&mut self, vertices: &[f32], color: [f32; 4], projection: &Mat4) {
        if vertices.is_empty() {
            return;
        }
        self.shader.bind();
        self.shader.set_mat4("u_projection", projection);
        self.shader.set_vec4("u_color", color);

        unsafe {
            gl::BindVertexArray(self.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                mem::size_of_val(vertices) as GLsizeiptr,
                vertices.as_ptr() as *const _,
                gl::DYNAMIC_DRAW,
            );
            gl::DrawArrays(gl::TRIANGLES, 0, (vertices.len() / 2) as GLsizei);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for TextRenderer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_uses_uppercase_glyphs() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), glyph('Z'));
    }

    #[test]
    fn space_emits_nothing() {
        assert!(text_vertices("   ", 0.0, 0.0, 2.0).is_empty());
    }

    #[test]
    fn one_quad_per_lit_pixel() {
        let lit: u32 = glyph('1').iter().map(|row| row.count_ones()).sum();
        let verts = text_vertices("1", 10.0, 20.0, 2.0);
        assert_eq!(verts.len(), lit as usize * 12);
        assert!(verts.chunks(2).all(|p| p[0] >= 10.0 && p[1] >= 20.0));
    }

    #[test]
    fn measure_scales_with_length() {
        assert_eq!(measure_text("", 2.0), 0.0);
        assert_eq!(measure_text("AB", 1.0), 11.0);
        assert_eq!(measure_text("AB", 2.0), 22.0);
    }
}
