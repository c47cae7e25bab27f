//! [RawModel]: parsed, un-welded OBJ data.

use std::io::BufRead;

use objweld_common::Real;

use crate::{
    error::{Attribute, Error, Warning},
    record::{required_components, AttributeRecord, FaceRecord, Record, RECORD_COMPONENTS},
    reference::{FaceVertexRef, Resolver},
};

/// Stride of [RawModel::positions].
pub const POSITION_STRIDE: usize = 3;
/// Stride of [RawModel::texcoords]; `u v w`, of which welding uses `u v`.
pub const RAW_TEXCOORD_STRIDE: usize = RECORD_COMPONENTS;
/// Stride of [RawModel::normals].
pub const NORMAL_STRIDE: usize = 3;

/// Attribute arrays and polygons, as read from an OBJ file.
///
/// Polygon `i` consists of `face_refs[face_start[i]..face_start[i + 1]]`; `face_start` always
/// ends with `face_refs.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawModel<R> {
    pub(crate) positions: Vec<R>,
    pub(crate) texcoords: Vec<R>,
    pub(crate) normals: Vec<R>,
    pub(crate) face_refs: Vec<FaceVertexRef>,
    pub(crate) face_start: Vec<usize>,
    /// Source line of each polygon.
    pub(crate) face_lines: Vec<usize>,
    pub(crate) warnings: Vec<Warning>,
}

impl<R> Default for RawModel<R> {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            texcoords: Vec::new(),
            normals: Vec::new(),
            face_refs: Vec::new(),
            face_start: vec![0],
            face_lines: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl<R> RawModel<R> {
    #[inline]
    pub fn positions(&self) -> &[R] {
        &self.positions
    }

    #[inline]
    pub fn texcoords(&self) -> &[R] {
        &self.texcoords
    }

    #[inline]
    pub fn normals(&self) -> &[R] {
        &self.normals
    }

    #[inline]
    pub fn face_refs(&self) -> &[FaceVertexRef] {
        &self.face_refs
    }

    #[inline]
    pub fn face_start(&self) -> &[usize] {
        &self.face_start
    }

    /// Problems encountered while reading, in source order.
    #[inline]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The number of polygons.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_start.len() - 1
    }

    /// Corners of polygon `i`.
    ///
    /// # Panics
    ///
    /// * `i >= self.face_count()`
    #[inline]
    pub fn face(&self, i: usize) -> &[FaceVertexRef] {
        &self.face_refs[self.face_start[i]..self.face_start[i + 1]]
    }

    /// Iterate over `(source line, corners)` for each polygon.
    pub fn faces(
        &self,
    ) -> impl DoubleEndedIterator<Item = (usize, &[FaceVertexRef])> + ExactSizeIterator + '_ {
        self.face_start
            .windows(2)
            .zip(&self.face_lines)
            .map(|(w, &line)| (line, &self.face_refs[w[0]..w[1]]))
    }

    /// Whether every polygon is a triangle.
    pub fn is_triangulated(&self) -> bool {
        self.face_start.windows(2).all(|w| w[1] - w[0] == 3)
    }
}

impl<R: Real> RawModel<R> {
    /// Read a model from a line-oriented source.
    ///
    /// Only I/O failures are errors; malformed records are recorded as [warnings](Self::warnings).
    /// Bytes which aren't valid UTF-8 are replaced with U+FFFD before parsing.
    #[tracing::instrument(skip_all)]
    pub fn from_reader(mut reader: impl BufRead, relative_indices: bool) -> Result<Self, Error> {
        let mut builder = RawModelBuilder::new().relative_indices(relative_indices);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            builder.push_line(&String::from_utf8_lossy(&buf));
        }
        Ok(builder.finish())
    }

    /// Read a model from a string.
    pub fn parse_str(src: &str, relative_indices: bool) -> Self {
        let mut builder = RawModelBuilder::new().relative_indices(relative_indices);
        for line in src.lines() {
            builder.push_line(line);
        }
        builder.finish()
    }
}

/// Accumulates records into a [RawModel].
#[derive(Debug)]
pub struct RawModelBuilder<R> {
    model: RawModel<R>,
    relative_indices: bool,
    line: usize,
}

impl<R: Real> Default for RawModelBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Real> RawModelBuilder<R> {
    pub fn new() -> Self {
        Self {
            model: RawModel::default(),
            relative_indices: false,
            line: 0,
        }
    }

    /// Resolve negative face indices relative to the end of each attribute list.
    pub fn relative_indices(mut self, enable: bool) -> Self {
        self.relative_indices = enable;
        self
    }

    /// Parse and accumulate the next line of the source.
    pub fn push_line(&mut self, line: &str) {
        self.line += 1;
        match Record::<R>::parse(line) {
            Record::Attribute(rec) => self.push_attribute(rec),
            Record::Face(rec) => self.push_face(rec),
            Record::Ignored => {}
        }
    }

    fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.model.warnings.push(warning);
    }

    fn push_attribute(&mut self, rec: AttributeRecord<R>) {
        let line = self.line;
        for token in &rec.malformed {
            self.warn(Warning::MalformedComponent {
                line,
                attribute: rec.attribute,
                token: token.clone(),
            });
        }
        let expected = required_components(rec.attribute);
        if rec.found < expected {
            self.warn(Warning::ShortRecord {
                line,
                attribute: rec.attribute,
                found: rec.found,
                expected,
            });
        }
        let target = match rec.attribute {
            Attribute::Position => &mut self.model.positions,
            Attribute::Texcoord => &mut self.model.texcoords,
            Attribute::Normal => &mut self.model.normals,
        };
        target.extend_from_slice(&rec.values);
    }

    fn push_face(&mut self, rec: FaceRecord<'_>) {
        let line = self.line;
        let resolver = Resolver {
            relative: self.relative_indices,
            counts: [
                self.model.positions.len() / POSITION_STRIDE,
                self.model.texcoords.len() / RAW_TEXCOORD_STRIDE,
                self.model.normals.len() / NORMAL_STRIDE,
            ],
        };
        for token in rec.rejected {
            self.warn(Warning::RejectedCorner {
                line,
                token: token.to_owned(),
            });
        }
        for (token, corner) in rec.corners {
            match resolver.resolve(corner) {
                Some(r) => self.model.face_refs.push(r),
                None => self.warn(Warning::RejectedCorner {
                    line,
                    token: token.to_owned(),
                }),
            }
        }
        tracing::trace!(
            line,
            corners = self.model.face_refs.len() - self.last_start(),
            "read face"
        );
        self.model.face_start.push(self.model.face_refs.len());
        self.model.face_lines.push(line);
    }

    fn last_start(&self) -> usize {
        self.model.face_start.last().copied().unwrap_or(0)
    }

    /// Stop accumulating; the model is not modified afterward.
    pub fn finish(self) -> RawModel<R> {
        let m = self.model;
        tracing::debug!(
            lines = self.line,
            positions = m.positions.len() / POSITION_STRIDE,
            texcoords = m.texcoords.len() / RAW_TEXCOORD_STRIDE,
            normals = m.normals.len() / NORMAL_STRIDE,
            faces = m.face_count(),
            corners = m.face_refs.len(),
            warnings = m.warnings.len(),
            "read OBJ source"
        );
        m
    }
}
