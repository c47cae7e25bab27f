//! [FaceVertexRef], the corner of a polygon.

/// One corner of a face, naming the attributes it uses. All indices are 0-based.
///
/// The derived ordering is lexicographic over `(position, texcoord, normal)`, with an absent
/// index sorting before any present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceVertexRef {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

impl FaceVertexRef {
    #[inline]
    pub const fn new(position: usize, texcoord: Option<usize>, normal: Option<usize>) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }

    /// A corner which only references a position.
    #[inline]
    pub const fn position(position: usize) -> Self {
        Self::new(position, None, None)
    }

    /// The texcoord index used when welding; falls back to the position index.
    #[inline]
    pub fn texcoord_or_position(&self) -> usize {
        self.texcoord.unwrap_or(self.position)
    }

    /// The normal index used when welding; falls back to the position index.
    #[inline]
    pub fn normal_or_position(&self) -> usize {
        self.normal.unwrap_or(self.position)
    }
}

/// A face corner as written in the source, before resolution: 1-based, possibly signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub position: i64,
    pub texcoord: Option<i64>,
    pub normal: Option<i64>,
}

/// How the signed indices of a [Corner] map onto attribute arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolver {
    pub relative: bool,
    /// Number of complete records of each attribute seen so far: position, texcoord, normal
    pub counts: [usize; 3],
}

impl Resolver {
    /// `i` is 1-based; negative values count back from the end when `relative` is set.
    fn index(&self, i: i64, count: usize) -> Option<usize> {
        match i {
            i if i > 0 => usize::try_from(i - 1).ok(),
            i if i < 0 && self.relative => {
                let back = usize::try_from(i.unsigned_abs()).ok()?;
                count.checked_sub(back)
            }
            _ => None,
        }
    }

    /// `None` if the position index can't be resolved; bad optional indices resolve to absent.
    pub fn resolve(&self, corner: Corner) -> Option<FaceVertexRef> {
        let [positions, texcoords, normals] = self.counts;
        Some(FaceVertexRef {
            position: self.index(corner.position, positions)?,
            texcoord: corner.texcoord.and_then(|t| self.index(t, texcoords)),
            normal: corner.normal.and_then(|n| self.index(n, normals)),
        })
    }
}
