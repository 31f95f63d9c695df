use glam::{Vec2, Vec3};
use std::f32::consts::PI;

/// CPU-side triangle mesh: interleaved position + normal (6 floats per vertex).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub const STRIDE: usize = 6;

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::STRIDE
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&[
            position.x, position.y, position.z, normal.x, normal.y, normal.z,
        ]);
        index
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let base = index * Self::STRIDE;
        Vec3::new(self.vertices[base], self.vertices[base + 1], self.vertices[base + 2])
    }

    /// Scale positions in place; normals are unchanged for uniform scale.
    pub fn scale(&mut self, factor: f32) {
        for chunk in self.vertices.chunks_exact_mut(Self::STRIDE) {
            chunk[0] *= factor;
            chunk[1] *= factor;
            chunk[2] *= factor;
        }
    }
}

pub fn sphere(radius: f32, stacks: u32, sectors: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for i in 0..=stacks {
        let stack_angle = PI / 2.0 - (i as f32) * PI / (stacks as f32);
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = 2.0 * PI * (j as f32) / (sectors as f32);
            let x = xy * sector_angle.cos();
            let y = xy * sector_angle.sin();

            let normal = Vec3::new(
                stack_angle.cos() * sector_angle.cos(),
                stack_angle.sin(),
                stack_angle.cos() * sector_angle.sin(),
            );
            mesh.push_vertex(Vec3::new(x, z, y), normal);
        }
    }

    for i in 0..stacks {
        for j in 0..sectors {
            let first = i * (sectors + 1) + j;
            let second = first + sectors + 1;
            mesh.indices
                .extend_from_slice(&[first, second, first + 1, first + 1, second, second + 1]);
        }
    }

    mesh
}

pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let hd = depth * 0.5;

    #[rustfmt::skip]
    let vertices: Vec<f32> = vec![
        // Front face (+Z)
        -hw, -hh,  hd,  0.0,  0.0,  1.0,
         hw, -hh,  hd,  0.0,  0.0,  1.0,
         hw,  hh,  hd,  0.0,  0.0,  1.0,
        -hw,  hh,  hd,  0.0,  0.0,  1.0,
        // Back face (-Z)
         hw, -hh, -hd,  0.0,  0.0, -1.0,
        -hw, -hh, -hd,  0.0,  0.0, -1.0,
        -hw,  hh, -hd,  0.0,  0.0, -1.0,
         hw,  hh, -hd,  0.0,  0.0, -1.0,
        // Top face (+Y)
        -hw,  hh,  hd,  0.0,  1.0,  0.0,
         hw,  hh,  hd,  0.0,  1.0,  0.0,
         hw,  hh, -hd,  0.0,  1.0,  0.0,
        -hw,  hh, -hd,  0.0,  1.0,  0.0,
        // Bottom face (-Y)
        -hw, -hh, -hd,  0.0, -1.0,  0.0,
         hw, -hh, -hd,  0.0, -1.0,  0.0,
         hw, -hh,  hd,  0.0, -1.0,  0.0,
        -hw, -hh,  hd,  0.0, -1.0,  0.0,
        // Right face (+X)
         hw, -hh,  hd,  1.0,  0.0,  0.0,
         hw, -hh, -hd,  1.0,  0.0,  0.0,
         hw,  hh, -hd,  1.0,  0.0,  0.0,
         hw,  hh,  hd,  1.0,  0.0,  0.0,
        // Left face (-X)
        -hw, -hh, -hd, -1.0,  0.0,  0.0,
        -hw, -hh,  hd, -1.0,  0.0,  0.0,
        -hw,  hh,  hd, -1.0,  0.0,  0.0,
        -hw,  hh, -hd, -1.0,  0.0,  0.0,
    ];

    let mut indices = Vec::new();
    for face in 0..6u32 {
        let base = face * 4;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Sweep a simple polygon from z = 0 to z = `depth`.
///
/// The ring may be in either winding; caps face -Z and +Z, side walls face
/// outward.
pub fn extrude(ring: &[Vec2], depth: f32) -> MeshData {
    let mut mesh = MeshData::default();
    if ring.len() < 3 {
        return mesh;
    }

    let ccw: Vec<Vec2> = if signed_area(ring) < 0.0 {
        ring.iter().rev().copied().collect()
    } else {
        ring.to_vec()
    };
    let triangles = triangulate(&ccw);

    // Front cap (+Z)
    let front: Vec<u32> = ccw
        .iter()
        .map(|p| mesh.push_vertex(p.extend(depth), Vec3::Z))
        .collect();
    for [a, b, c] in &triangles {
        mesh.indices.extend_from_slice(&[front[*a], front[*b], front[*c]]);
    }

    // Back cap (-Z), reversed winding
    let back: Vec<u32> = ccw
        .iter()
        .map(|p| mesh.push_vertex(p.extend(0.0), Vec3::NEG_Z))
        .collect();
    for [a, b, c] in &triangles {
        mesh.indices.extend_from_slice(&[back[*a], back[*c], back[*b]]);
    }

    // Side walls: one flat-shaded quad per edge
    for i in 0..ccw.len() {
        let p0 = ccw[i];
        let p1 = ccw[(i + 1) % ccw.len()];
        let edge = p1 - p0;
        if edge.length_squared() < 1e-12 {
            continue;
        }
        let normal = Vec2::new(edge.y, -edge.x).normalize().extend(0.0);
        let i0 = mesh.push_vertex(p0.extend(0.0), normal);
        let i1 = mesh.push_vertex(p1.extend(0.0), normal);
        let i2 = mesh.push_vertex(p1.extend(depth), normal);
        let i3 = mesh.push_vertex(p0.extend(depth), normal);
        mesh.indices.extend_from_slice(&[i0, i1, i2, i0, i2, i3]);
    }

    mesh
}

/// Twice-signed area halved: positive for counter-clockwise rings.
pub fn signed_area(ring: &[Vec2]) -> f32 {
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a.perp_dot(b);
    }
    sum * 0.5
}

/// Ear-clipping triangulation of a counter-clockwise simple polygon.
/// Returns index triples into `ring`, each wound counter-clockwise.
pub fn triangulate(ring: &[Vec2]) -> Vec<[usize; 3]> {
    let mut remaining: Vec<usize> = (0..ring.len()).collect();
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));

    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n).find(|&i| {
            let a = remaining[(i + n - 1) % n];
            let b = remaining[i];
            let c = remaining[(i + 1) % n];
            is_ear(ring, &remaining, a, b, c)
        });

        match ear {
            Some(i) => {
                let a = remaining[(i + n - 1) % n];
                let c = remaining[(i + 1) % n];
                triangles.push([a, remaining[i], c]);
                remaining.remove(i);
            }
            None => {
                // No convex ear left: drop a collinear vertex, or give up on
                // a degenerate ring.
                let flat = (0..n).find(|&i| {
                    let a = ring[remaining[(i + n - 1) % n]];
                    let b = ring[remaining[i]];
                    let c = ring[remaining[(i + 1) % n]];
                    (b - a).perp_dot(c - b).abs() <= 1e-9
                });
                match flat {
                    Some(i) => {
                        remaining.remove(i);
                    }
                    None => break,
                }
            }
        }
    }

    if remaining.len() == 3 {
        triangles.push([remaining[0], remaining[1], remaining[2]]);
    }
    triangles
}

fn is_ear(ring: &[Vec2], remaining: &[usize], a: usize, b: usize, c: usize) -> bool {
    let (pa, pb, pc) = (ring[a], ring[b], ring[c]);
    if (pb - pa).perp_dot(pc - pb) <= 1e-9 {
        return false;
    }
    remaining
        .iter()
        .filter(|&&k| k != a && k != b && k != c)
        .all(|&k| !point_in_triangle(ring[k], pa, pb, pc))
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}
