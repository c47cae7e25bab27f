use std::{fmt, io, path::PathBuf};

/// A per-vertex attribute stream within an OBJ file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    Texcoord,
    Normal,
}

impl Attribute {
    /// The keyword introducing a record of this attribute.
    pub const fn keyword(self) -> &'static str {
        match self {
            Attribute::Position => "v",
            Attribute::Texcoord => "vt",
            Attribute::Normal => "vn",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Position => f.write_str("position"),
            Attribute::Texcoord => f.write_str("texcoord"),
            Attribute::Normal => f.write_str("normal"),
        }
    }
}

/// Errors which abort loading a mesh.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("could not open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("polygon on line {line} has {corners} corner(s); at least 3 are required")]
    DegenerateFace { line: usize, corners: usize },
    #[error("face on line {line} references {attribute} {index}, but only {len} were defined")]
    IndexOutOfRange {
        attribute: Attribute,
        /// 0-based
        index: usize,
        /// Number of complete records of `attribute`
        len: usize,
        line: usize,
    },
    #[error("mesh has {count} distinct vertices, which is more than its index type can address")]
    IndexOverflow { count: usize },
}

/// Problems which are reported, but which do not stop the load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    #[error("line {line}: {attribute} record has {found} of {expected} components; missing components are 0")]
    ShortRecord {
        line: usize,
        attribute: Attribute,
        found: usize,
        expected: usize,
    },
    #[error("line {line}: could not parse `{token}` as a {attribute} component; using 0")]
    MalformedComponent {
        line: usize,
        attribute: Attribute,
        token: String,
    },
    #[error("line {line}: dropped face corner `{token}`")]
    RejectedCorner { line: usize, token: String },
    #[error("line {line}: skipped polygon with {corners} corner(s)")]
    SkippedFace { line: usize, corners: usize },
}
