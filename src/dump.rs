//! Human-readable listings of [Meshes](Mesh).

use std::fmt;

use objweld_common::{ArrayIndex, Real};

use crate::mesh::{Mesh, NORMAL_STRIDE, TEXCOORD_STRIDE, TRIANGLE_STRIDE, VERTEX_STRIDE};

fn write_block<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    values: &[T],
    stride: usize,
) -> fmt::Result {
    if values.is_empty() {
        return Ok(());
    }
    writeln!(f, "{label} {}", values.len() / stride)?;
    for tuple in values.chunks(stride) {
        let mut first = true;
        for v in tuple {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{v}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// One block per non-empty stream: a `<label> <count>` header, then one tuple per line.
impl<R: Real, Idx: ArrayIndex> fmt::Display for Mesh<R, Idx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, "vertices", &self.vertices, VERTEX_STRIDE)?;
        if let Some(texcoords) = &self.texcoords {
            write_block(f, "texcoords", texcoords, TEXCOORD_STRIDE)?;
        }
        if let Some(normals) = &self.normals {
            write_block(f, "normals", normals, NORMAL_STRIDE)?;
        }
        write_block(f, "indices", &self.indices, TRIANGLE_STRIDE)
    }
}

/// Counts of each stream of a [Mesh], displayed on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Summary {
    pub vertices: usize,
    pub texcoords: usize,
    pub normals: usize,
    pub faces: usize,
}

impl<R: Real, Idx: ArrayIndex> From<&Mesh<R, Idx>> for Summary {
    fn from(mesh: &Mesh<R, Idx>) -> Self {
        Self {
            vertices: mesh.vertex_count(),
            texcoords: mesh.texcoords.as_ref().map_or(0, |t| t.len() / TEXCOORD_STRIDE),
            normals: mesh.normals.as_ref().map_or(0, |n| n.len() / NORMAL_STRIDE),
            faces: mesh.triangle_count(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} texcoords, {} normals, {} faces",
            self.vertices, self.texcoords, self.normals, self.faces
        )
    }
}
