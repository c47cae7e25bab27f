use nalgebra::{Point2, Point3, Vector3};
use objweld_common::{ArrayIndex, Real};

/// Stride of [Mesh::vertices].
pub const VERTEX_STRIDE: usize = 3;
/// Stride of [Mesh::texcoords].
pub const TEXCOORD_STRIDE: usize = 2;
/// Stride of [Mesh::normals].
pub const NORMAL_STRIDE: usize = 3;
/// Stride of [Mesh::indices].
pub const TRIANGLE_STRIDE: usize = 3;

/// A welded, single-indexed triangle mesh.
///
/// Vertex `i` consists of `vertices[3i..3i + 3]`, along with `texcoords[2i..2i + 2]` and
/// `normals[3i..3i + 3]` if those streams exist. Each triangle is three consecutive entries of
/// `indices`, and every index is less than [vertex_count](Self::vertex_count).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<R = f32, Idx: ArrayIndex = u32> {
    pub vertices: Vec<R>,
    /// Present iff the source defined any texcoords.
    pub texcoords: Option<Vec<R>>,
    /// Present iff the source defined any normals.
    pub normals: Option<Vec<R>>,
    pub indices: Vec<Idx>,
}

static_assertions::assert_impl_all!(Mesh: Send, Sync);

impl<R, Idx: ArrayIndex> Default for Mesh<R, Idx> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            texcoords: None,
            normals: None,
            indices: Vec::new(),
        }
    }
}

impl<R: Real, Idx: ArrayIndex> Mesh<R, Idx> {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / TRIANGLE_STRIDE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn position(&self, i: usize) -> Option<Point3<R>> {
        let p = self.vertices.get(i * VERTEX_STRIDE..(i + 1) * VERTEX_STRIDE)?;
        Some(Point3::new(p[0], p[1], p[2]))
    }

    pub fn texcoord(&self, i: usize) -> Option<Point2<R>> {
        let t = self
            .texcoords
            .as_ref()?
            .get(i * TEXCOORD_STRIDE..(i + 1) * TEXCOORD_STRIDE)?;
        Some(Point2::new(t[0], t[1]))
    }

    pub fn normal(&self, i: usize) -> Option<Vector3<R>> {
        let n = self
            .normals
            .as_ref()?
            .get(i * NORMAL_STRIDE..(i + 1) * NORMAL_STRIDE)?;
        Some(Vector3::new(n[0], n[1], n[2]))
    }

    /// The vertex indices of each triangle, in draw order.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [Idx; 3]> + '_ {
        self.indices
            .chunks_exact(TRIANGLE_STRIDE)
            .map(|t| [t[0], t[1], t[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let mesh = Mesh::<f32, u16> {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            texcoords: Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
            normals: None,
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.position(1), Some(Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(mesh.position(3), None);
        assert_eq!(mesh.texcoord(2), Some(Point2::new(0.0, 1.0)));
        assert_eq!(mesh.normal(0), None);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), [[0, 1, 2]]);
    }

    #[test]
    fn empty() {
        let mesh = Mesh::<f64, u32>::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangles().count(), 0);
    }
}
