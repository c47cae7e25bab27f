//! Vertex welding: collapsing identical face corners into shared vertices.

use std::collections::{hash_map::Entry, HashMap};

use objweld_common::{ArrayIndex, Real};

use crate::{
    error::{Attribute, Error},
    mesh::{Mesh, NORMAL_STRIDE, TEXCOORD_STRIDE, VERTEX_STRIDE},
    raw::{RawModel, NORMAL_STRIDE as RAW_NORMAL_STRIDE, POSITION_STRIDE, RAW_TEXCOORD_STRIDE},
    reference::FaceVertexRef,
};

/// The order of vertices in a welded [Mesh].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexOrder {
    /// Vertices appear in the order their corners are first referenced.
    #[default]
    FirstUse,
    /// Vertices are sorted by `(position, texcoord, normal)`, absent indices first.
    Sorted,
}

/// The distinct corners of a model, each with a dense rank.
#[derive(Debug, Default)]
pub struct CanonicalSet {
    ranks: HashMap<FaceVertexRef, usize>,
    /// `refs[rank]`
    refs: Vec<FaceVertexRef>,
}

impl CanonicalSet {
    /// Collect every distinct corner of `refs`.
    pub fn build(refs: &[FaceVertexRef], order: VertexOrder) -> Self {
        let mut res = Self::default();
        for &r in refs {
            res.insert(r);
        }
        if order == VertexOrder::Sorted {
            res.sort();
        }
        res
    }

    /// Rank of `r`, inserting it if absent.
    pub fn insert(&mut self, r: FaceVertexRef) -> usize {
        match self.ranks.entry(r) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let rank = self.refs.len();
                self.refs.push(r);
                *e.insert(rank)
            }
        }
    }

    /// Re-rank in `(position, texcoord, normal)` order; returns the new rank of each old rank.
    fn sort(&mut self) -> Vec<usize> {
        self.refs.sort_unstable();
        let mut remap = vec![0; self.refs.len()];
        for (rank, r) in self.refs.iter().enumerate() {
            if let Some(old) = self.ranks.insert(*r, rank) {
                remap[old] = rank;
            }
        }
        remap
    }

    #[inline]
    pub fn rank(&self, r: &FaceVertexRef) -> Option<usize> {
        self.ranks.get(r).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Distinct corners, in rank order.
    #[inline]
    pub fn refs(&self) -> &[FaceVertexRef] {
        &self.refs
    }
}

/// Copy `dst_stride` components of record `index` out of `src`.
fn copy_record<R: Real>(
    dst: &mut Vec<R>,
    src: &[R],
    src_stride: usize,
    dst_stride: usize,
    index: usize,
    attribute: Attribute,
    line: usize,
) -> Result<(), Error> {
    let range = index
        .checked_mul(src_stride)
        .and_then(|start| Some(start..start.checked_add(dst_stride)?));
    match range.and_then(|range| src.get(range)) {
        Some(values) => {
            dst.extend_from_slice(values);
            Ok(())
        }
        None => Err(Error::IndexOutOfRange {
            attribute,
            index,
            len: src.len() / src_stride,
            line,
        }),
    }
}

/// Weld a model into a single-indexed [Mesh].
///
/// Polygons are fan-triangulated first if `raw` isn't already triangulated; use
/// [tesselate](crate::tesselate::tesselate) beforehand to control how degenerate polygons are
/// handled.
///
/// A corner without a texcoord (or normal) index uses the texcoord (or normal) at its position
/// index, if the model has any texcoords (or normals).
#[tracing::instrument(skip_all, fields(corners = raw.face_refs().len(), order = ?order))]
pub fn weld<R: Real, Idx: ArrayIndex>(
    raw: RawModel<R>,
    order: VertexOrder,
) -> Result<Mesh<R, Idx>, Error> {
    let raw = crate::tesselate::tesselate(raw, Default::default())?;

    // rank every corner, and note the line of the first face referencing each vertex
    let mut set = CanonicalSet::default();
    let mut ranks = Vec::with_capacity(raw.face_refs().len());
    let mut first_line = Vec::new();
    for (line, face) in raw.faces() {
        for &r in face {
            let rank = set.insert(r);
            if rank == first_line.len() {
                first_line.push(line);
            }
            ranks.push(rank);
        }
    }
    if order == VertexOrder::Sorted {
        let remap = set.sort();
        let mut sorted_lines = vec![0; first_line.len()];
        for (&line, &rank) in first_line.iter().zip(&remap) {
            sorted_lines[rank] = line;
        }
        first_line = sorted_lines;
        for rank in &mut ranks {
            *rank = remap[*rank];
        }
    }

    let count = set.len();
    let indices = ranks
        .into_iter()
        .map(|rank| Idx::from_usize(rank).ok_or(Error::IndexOverflow { count }))
        .collect::<Result<Vec<Idx>, _>>()?;

    let has_texcoords = !raw.texcoords().is_empty();
    let has_normals = !raw.normals().is_empty();
    let mut vertices = Vec::with_capacity(set.len() * VERTEX_STRIDE);
    let mut texcoords = Vec::with_capacity(usize::from(has_texcoords) * set.len() * TEXCOORD_STRIDE);
    let mut normals = Vec::with_capacity(usize::from(has_normals) * set.len() * NORMAL_STRIDE);

    for (r, &line) in set.refs().iter().zip(&first_line) {
        copy_record(
            &mut vertices,
            raw.positions(),
            POSITION_STRIDE,
            VERTEX_STRIDE,
            r.position,
            Attribute::Position,
            line,
        )?;
        if has_texcoords {
            copy_record(
                &mut texcoords,
                raw.texcoords(),
                RAW_TEXCOORD_STRIDE,
                TEXCOORD_STRIDE,
                r.texcoord_or_position(),
                Attribute::Texcoord,
                line,
            )?;
        }
        if has_normals {
            copy_record(
                &mut normals,
                raw.normals(),
                RAW_NORMAL_STRIDE,
                NORMAL_STRIDE,
                r.normal_or_position(),
                Attribute::Normal,
                line,
            )?;
        }
    }

    tracing::debug!(
        vertices = set.len(),
        triangles = indices.len() / 3,
        "welded mesh"
    );

    Ok(Mesh {
        vertices,
        texcoords: has_texcoords.then_some(texcoords),
        normals: has_normals.then_some(normals),
        indices,
    })
}
