//! Classification and parsing of single OBJ lines.

use objweld_common::Real;

use crate::{error::Attribute, reference::Corner};

/// Slots read from each `v`, `vt`, and `vn` record.
pub const RECORD_COMPONENTS: usize = 3;

/// A numeric attribute record, as read from a single line.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRecord<R> {
    pub attribute: Attribute,
    /// Unset slots are 0.
    pub values: [R; RECORD_COMPONENTS],
    /// How many slots were present on the line, parseable or not.
    pub found: usize,
    /// Tokens in the first [RECORD_COMPONENTS] slots which failed to parse.
    pub malformed: Vec<String>,
}

/// Slots which must be present for a record to be complete; a texcoord's `w` is optional.
pub const fn required_components(attribute: Attribute) -> usize {
    match attribute {
        Attribute::Texcoord => 2,
        Attribute::Position | Attribute::Normal => RECORD_COMPONENTS,
    }
}

/// One face, as read from a single line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaceRecord<'l> {
    /// Each corner, with the token it was read from.
    pub corners: Vec<(&'l str, Corner)>,
    /// Tokens whose position field could not be parsed.
    pub rejected: Vec<&'l str>,
}

/// A single logical line of an OBJ file.
#[derive(Debug, Clone, PartialEq)]
pub enum Record<'l, R> {
    Attribute(AttributeRecord<R>),
    Face(FaceRecord<'l>),
    /// Comments, blank lines, and unsupported keywords.
    Ignored,
}

impl<'l, R: Real> Record<'l, R> {
    pub fn parse(line: &'l str) -> Self {
        let mut tokens = line.split_whitespace();
        let attribute = match tokens.next() {
            Some("v") => Attribute::Position,
            Some("vt") => Attribute::Texcoord,
            Some("vn") => Attribute::Normal,
            Some("f") => return Self::Face(FaceRecord::parse(tokens)),
            _ => return Self::Ignored,
        };
        Self::Attribute(AttributeRecord::parse(attribute, tokens))
    }
}

impl<R: Real> AttributeRecord<R> {
    fn parse<'l>(attribute: Attribute, tokens: impl Iterator<Item = &'l str>) -> Self {
        let mut values = [R::ZERO; RECORD_COMPONENTS];
        let mut found = 0;
        let mut malformed = Vec::new();
        for (slot, token) in values.iter_mut().zip(tokens) {
            found += 1;
            match token.parse::<R>() {
                Ok(v) => *slot = v,
                Err(_) => malformed.push(token.to_owned()),
            }
        }
        Self {
            attribute,
            values,
            found,
            malformed,
        }
    }

    /// Whether every required slot was present, and every present slot held a number.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.found >= required_components(self.attribute) && self.malformed.is_empty()
    }
}

impl<'l> FaceRecord<'l> {
    fn parse(tokens: impl Iterator<Item = &'l str>) -> Self {
        let mut res = Self::default();
        for token in tokens {
            match parse_corner(token) {
                Some(c) => res.corners.push((token, c)),
                None => res.rejected.push(token),
            }
        }
        res
    }
}

/// Parse `position[/texcoord][/normal]`.
///
/// Returns `None` only if the position field isn't an integer; malformed or empty optional
/// fields are absent.
pub fn parse_corner(token: &str) -> Option<Corner> {
    let mut fields = token.split('/');
    let position = fields.next()?.parse::<i64>().ok()?;
    let mut optional = || fields.next().and_then(|f| f.parse::<i64>().ok());
    let texcoord = optional();
    let normal = optional();
    Some(Corner {
        position,
        texcoord,
        normal,
    })
}
