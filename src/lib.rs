#![doc = include_str!("../README.md")]
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod dump;
pub mod error;
mod mesh;
pub mod raw;
pub mod record;
mod reference;
pub mod tesselate;
pub mod weld;

pub use error::{Attribute, Error, Warning};
pub use mesh::*;
pub use objweld_common::{ArrayIndex, Real};
pub use raw::{RawModel, RawModelBuilder};
pub use reference::{Corner, FaceVertexRef};
pub use tesselate::DegeneratePolicy;
pub use weld::VertexOrder;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Settings for [load] and friends.
///
/// By default, only positive face indices are accepted and polygons of fewer than 3 corners are
/// errors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadOptions {
    /// Resolve negative face indices relative to the end of each attribute list, instead of
    /// dropping them.
    pub relative_indices: bool,
    pub degenerate: DegeneratePolicy,
    pub order: VertexOrder,
}

impl LoadOptions {
    /// Run the tesselation and welding stages on an already-read model.
    pub fn finish<R: Real, Idx: ArrayIndex>(
        &self,
        raw: RawModel<R>,
    ) -> Result<Loaded<R, Idx>, Error> {
        let mut raw = tesselate::tesselate(raw, self.degenerate)?;
        let warnings = std::mem::take(&mut raw.warnings);
        Ok(Loaded {
            mesh: weld::weld(raw, self.order)?,
            warnings,
        })
    }
}

/// A welded mesh, along with the problems skipped over while loading it.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<R = f32, Idx: ArrayIndex = u32> {
    pub mesh: Mesh<R, Idx>,
    /// In source order.
    pub warnings: Vec<Warning>,
}

impl<R, Idx: ArrayIndex> Loaded<R, Idx> {
    #[inline]
    pub fn into_mesh(self) -> Mesh<R, Idx> {
        self.mesh
    }
}

/// Read an OBJ source and weld it into a [Mesh].
pub fn load<R: Real, Idx: ArrayIndex>(
    reader: impl BufRead,
    options: &LoadOptions,
) -> Result<Loaded<R, Idx>, Error> {
    let raw = RawModel::from_reader(reader, options.relative_indices)?;
    options.finish(raw)
}

/// As [load], from a string.
pub fn load_str<R: Real, Idx: ArrayIndex>(
    src: &str,
    options: &LoadOptions,
) -> Result<Loaded<R, Idx>, Error> {
    options.finish(RawModel::parse_str(src, options.relative_indices))
}

/// As [load], from a file. The file is closed before this returns.
#[tracing::instrument(skip_all, fields(path = ?path.as_ref()))]
pub fn load_path<R: Real, Idx: ArrayIndex>(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Loaded<R, Idx>, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_owned(),
        source,
    })?;
    load(BufReader::new(file), options)
}
