//! Fan triangulation of polygons.

use crate::{
    error::{Error, Warning},
    raw::RawModel,
};

/// What to do with polygons that have fewer than 3 corners.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegeneratePolicy {
    /// Fail with [Error::DegenerateFace].
    #[default]
    Reject,
    /// Emit no triangles for the polygon, and record a [Warning].
    Skip,
}

/// Triangulate a polygon as a fan around its first corner.
///
/// Yields `corners.len() - 2` triangles, where triangle `i` is `(c₀, cᵢ₊₁, cᵢ₊₂)`; polygons of
/// fewer than 3 corners yield nothing.
pub fn fan<T: Copy>(corners: &[T]) -> impl ExactSizeIterator<Item = [T; 3]> + '_ {
    // windows are empty unless there are at least 2 corners, so `corners[0]` exists
    corners
        .windows(2)
        .skip(1)
        .map(move |w| [corners[0], w[0], w[1]])
}

/// Split every polygon of `raw` into triangles, preserving polygon order.
#[tracing::instrument(skip_all, fields(faces = raw.face_count()))]
pub fn tesselate<R>(raw: RawModel<R>, policy: DegeneratePolicy) -> Result<RawModel<R>, Error> {
    if raw.is_triangulated() {
        return Ok(raw);
    }

    let triangles: usize = raw
        .faces()
        .map(|(_, f)| f.len().saturating_sub(2))
        .sum();
    let mut face_refs = Vec::with_capacity(triangles * 3);
    let mut face_start = Vec::with_capacity(triangles + 1);
    let mut face_lines = Vec::with_capacity(triangles);
    let mut warnings = Vec::new();
    face_start.push(0);

    for (line, face) in raw.faces() {
        match face.len() {
            3 => {
                face_refs.extend_from_slice(face);
                face_start.push(face_refs.len());
                face_lines.push(line);
            }
            corners if corners < 3 => match policy {
                DegeneratePolicy::Reject => return Err(Error::DegenerateFace { line, corners }),
                DegeneratePolicy::Skip => {
                    let w = Warning::SkippedFace { line, corners };
                    tracing::warn!("{w}");
                    warnings.push(w);
                }
            },
            _ => {
                for tri in fan(face) {
                    face_refs.extend_from_slice(&tri);
                    face_start.push(face_refs.len());
                    face_lines.push(line);
                }
            }
        }
    }

    tracing::debug!(triangles = face_lines.len(), "tesselated polygons");

    let mut res = RawModel {
        face_refs,
        face_start,
        face_lines,
        ..raw
    };
    res.warnings.append(&mut warnings);
    Ok(res)
}
