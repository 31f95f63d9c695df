//! Background model loading.
//!
//! The target's mesh is produced on a worker thread and handed back over a
//! channel. The frame loop polls once per frame and is the only place the
//! result turns into an entity.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use glam::{Vec2, Vec3};
use tracing::{debug, warn};

use crate::error::AssetError;
use crate::geometry::mesh::extrude;
use crate::geometry::MeshData;

/// Where a model's triangles come from.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelSource {
    /// Wavefront OBJ file, uniformly scaled.
    Obj { path: PathBuf, scale: f32 },
    /// Closed outline extruded along +Z.
    Profile { outline: Vec<Vec2>, depth: f32 },
}

pub fn load_model(source: &ModelSource) -> Result<MeshData, AssetError> {
    match source {
        ModelSource::Obj { path, scale } => {
            let mut mesh = read_obj(path)?;
            mesh.scale(*scale);
            Ok(mesh)
        }
        ModelSource::Profile { outline, depth } => {
            let mesh = extrude(outline, *depth);
            if mesh.indices.is_empty() {
                return Err(AssetError::Empty);
            }
            Ok(mesh)
        }
    }
}

pub fn read_obj(path: &Path) -> Result<MeshData, AssetError> {
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj(&text)
}

/// Parse the geometry subset of Wavefront OBJ: `v`, `vn` and polygonal `f`
/// records. Faces are fan-triangulated; faces without normals get a flat one.
pub fn parse_obj(text: &str) -> Result<MeshData, AssetError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut mesh = MeshData::default();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "v" => positions.push(parse_vec3(&mut parts, line_no)?),
            "vn" => normals.push(parse_vec3(&mut parts, line_no)?),
            "f" => {
                let corners = parts
                    .map(|token| parse_corner(token, positions.len(), normals.len(), line_no))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(AssetError::Malformed {
                        line: line_no,
                        reason: format!("face has {} vertices, need at least 3", corners.len()),
                    });
                }
                let flat = face_normal(&corners, &positions);
                for k in 1..corners.len() - 1 {
                    for corner in [corners[0], corners[k], corners[k + 1]] {
                        let normal = corner.1.map(|n| normals[n]).unwrap_or(flat);
                        let index = mesh.push_vertex(positions[corner.0], normal);
                        mesh.indices.push(index);
                    }
                }
            }
            // Texture coords, groups, materials and smoothing are not needed.
            _ => {}
        }
    }

    if mesh.indices.is_empty() {
        return Err(AssetError::Empty);
    }
    Ok(mesh)
}

fn parse_vec3<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, AssetError> {
    let mut v = [0.0f32; 3];
    for slot in v.iter_mut() {
        let token = parts.next().ok_or_else(|| AssetError::Malformed {
            line,
            reason: "expected 3 coordinates".to_string(),
        })?;
        *slot = token.parse().map_err(|_| AssetError::Malformed {
            line,
            reason: format!("bad number {token:?}"),
        })?;
    }
    Ok(Vec3::from(v))
}

/// `v`, `v/vt`, `v//vn` or `v/vt/vn`, 1-based or negative (relative).
fn parse_corner(
    token: &str,
    position_count: usize,
    normal_count: usize,
    line: usize,
) -> Result<(usize, Option<usize>), AssetError> {
    let mut fields = token.split('/');
    let position = resolve_index(fields.next().unwrap_or(""), position_count, line)?;
    let _texcoord = fields.next();
    let normal = match fields.next() {
        Some(field) if !field.is_empty() => Some(resolve_index(field, normal_count, line)?),
        _ => None,
    };
    Ok((position, normal))
}

fn resolve_index(field: &str, count: usize, line: usize) -> Result<usize, AssetError> {
    let raw: i64 = field.parse().map_err(|_| AssetError::Malformed {
        line,
        reason: format!("bad index {field:?}"),
    })?;
    let resolved = if raw < 0 { count as i64 + raw } else { raw - 1 };
    if raw == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(AssetError::Malformed {
            line,
            reason: format!("index {raw} out of range (have {count})"),
        });
    }
    Ok(resolved as usize)
}

fn face_normal(corners: &[(usize, Option<usize>)], positions: &[Vec3]) -> Vec3 {
    let a = positions[corners[0].0];
    let b = positions[corners[1].0];
    let c = positions[corners[2].0];
    (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Y)
}

/// Runs one [`load_model`] on a worker thread.
pub struct AssetLoader {
    rx: Receiver<Result<MeshData, AssetError>>,
    finished: bool,
}

impl AssetLoader {
    pub fn spawn(source: ModelSource) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_tx = tx.clone();
        let worker_source = source.clone();
        let spawned = thread::Builder::new()
            .name("asset-loader".to_string())
            .spawn(move || {
                debug!(?worker_source, "loading model");
                let _ = worker_tx.send(load_model(&worker_source));
            });
        if let Err(err) = spawned {
            warn!(%err, "could not start loader thread, loading inline");
            let _ = tx.send(load_model(&source));
        }
        Self {
            rx,
            finished: false,
        }
    }

    /// Non-blocking. Yields the result exactly once.
    pub fn poll(&mut self) -> Option<Result<MeshData, AssetError>> {
        if self.finished {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.finished = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                Some(Err(AssetError::Disconnected))
            }
        }
    }
}
