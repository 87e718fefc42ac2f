//! Type schema: a closed description of every value's shape.
//!
//! A [`Shape`] is built once per protocol type and shared read-only by all
//! codec operations. The binary codec, the merkleizer and the textual codec
//! all dispatch over this tree rather than over concrete Rust types.

use std::fmt;

/// Size in bytes of a variable-size field's offset in the fixed prefix.
pub const BYTES_PER_OFFSET: usize = 4;

/// Size in bytes of a Merkle chunk.
pub const BYTES_PER_CHUNK: usize = 32;

/// Width of an unsigned integer scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
}

impl UintWidth {
    /// Encoded size in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
            Self::U128 => 16,
            Self::U256 => 32,
        }
    }

    /// Width in bits.
    pub const fn bits(self) -> usize {
        self.bytes() * 8
    }
}

/// One named field of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// External name, used as the key in textual forms.
    pub name: &'static str,
    /// Human-readable label used in error messages ("public key").
    pub label: &'static str,
    /// Shape of the field's value.
    pub shape: Shape,
}

impl Field {
    /// Create a field with an explicit label.
    pub fn new(name: &'static str, label: &'static str, shape: Shape) -> Self {
        Self { name, label, shape }
    }
}

/// An ordered record of named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerShape {
    /// Type name, for diagnostics only.
    pub name: &'static str,
    /// Fields in declared order.
    pub fields: Vec<Field>,
}

impl ContainerShape {
    /// Create a container shape.
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }
}

/// The shape of a protocol value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Boolean, one byte on the wire.
    Bool,
    /// Fixed-width little-endian unsigned integer.
    Uint(UintWidth),
    /// Fixed-length byte sequence (roots, public keys, signatures).
    ByteVector(usize),
    /// Variable-length byte sequence with a maximum length.
    ByteList(usize),
    /// Exactly N bits.
    BitVector(usize),
    /// Up to N bits, length carried by a sentinel bit on the wire.
    BitList(usize),
    /// Exactly N elements of the element shape.
    Vector(Box<Shape>, usize),
    /// Up to N elements of the element shape.
    List(Box<Shape>, usize),
    /// Ordered, named fields.
    Container(ContainerShape),
    /// A selector choosing one of several alternatives. `None` marks the
    /// empty alternative, which is only valid at selector 0.
    Union(Vec<Option<Shape>>),
}

impl Shape {
    /// Shorthand for a vector shape.
    pub fn vector(element: Shape, length: usize) -> Self {
        Self::Vector(Box::new(element), length)
    }

    /// Shorthand for a list shape.
    pub fn list(element: Shape, max: usize) -> Self {
        Self::List(Box::new(element), max)
    }

    /// Whether values of this shape always encode to the same byte length.
    pub fn is_fixed_size(&self) -> bool {
        match self {
            Self::Bool | Self::Uint(_) | Self::ByteVector(_) | Self::BitVector(_) => true,
            Self::ByteList(_) | Self::BitList(_) | Self::List(..) | Self::Union(_) => false,
            Self::Vector(element, _) => element.is_fixed_size(),
            Self::Container(c) => c.fields.iter().all(|f| f.shape.is_fixed_size()),
        }
    }

    /// Encoded byte length for fixed-size shapes, `None` otherwise.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Bool => Some(1),
            Self::Uint(w) => Some(w.bytes()),
            Self::ByteVector(n) => Some(*n),
            Self::BitVector(n) => Some(n.div_ceil(8)),
            Self::Vector(element, n) => element.fixed_size().map(|size| size * n),
            Self::Container(c) => c
                .fields
                .iter()
                .map(|f| f.shape.fixed_size())
                .sum::<Option<usize>>(),
            Self::ByteList(_) | Self::BitList(_) | Self::List(..) | Self::Union(_) => None,
        }
    }

    /// Bytes this shape occupies in its parent's fixed prefix: its own size
    /// when fixed, otherwise one offset.
    pub fn prefix_size(&self) -> usize {
        self.fixed_size().unwrap_or(BYTES_PER_OFFSET)
    }

    /// Whether this is a basic (packable) scalar.
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Bool | Self::Uint(_))
    }

    /// Short name for diagnostics.
    pub fn name(&self) -> String {
        match self {
            Self::Bool => "bool".into(),
            Self::Uint(w) => format!("uint{}", w.bits()),
            Self::ByteVector(n) => format!("ByteVector[{n}]"),
            Self::ByteList(n) => format!("ByteList[{n}]"),
            Self::BitVector(n) => format!("Bitvector[{n}]"),
            Self::BitList(n) => format!("Bitlist[{n}]"),
            Self::Vector(e, n) => format!("Vector[{}, {n}]", e.name()),
            Self::List(e, n) => format!("List[{}, {n}]", e.name()),
            Self::Container(c) => c.name.into(),
            Self::Union(_) => "Union".into(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
