//! Strong type definitions for the emission ledger.
//!
//! Identifiers are newtypes so element ids and category ids cannot be mixed
//! up at compile time. On the wire they are plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// Identifier of a chain element (`tceId` on the wire).
///
/// Generated ids are random UUID v4 strings. Ids parsed from foreign
/// documents may be any non-empty string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh, globally unique element id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of an operation category: a hub category (`hocId`) or a
/// transport category (`tocId`).
///
/// Hub and transport ids are drawn from disjoint ranges by convention only.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which record family a category id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Hub,
    Transport,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Hub => "hub",
            CategoryKind::Transport => "transport",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = CoreError;

    /// Accepts `hub`/`hoc` and `transport`/`toc`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hub" | "hoc" => Ok(CategoryKind::Hub),
            "transport" | "toc" => Ok(CategoryKind::Transport),
            _ => Err(CoreError::InvalidCategoryKind(s.to_string())),
        }
    }
}

/// The category a new chain element refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// A hub visit.
    Hub(CategoryId),
    /// A transport leg.
    Transport(CategoryId),
}

impl Category {
    pub fn new(kind: CategoryKind, id: impl Into<CategoryId>) -> Self {
        match kind {
            CategoryKind::Hub => Category::Hub(id.into()),
            CategoryKind::Transport => Category::Transport(id.into()),
        }
    }

    /// Build a category from an untyped kind discriminator.
    pub fn from_parts(kind: &str, id: &str) -> Result<Self, CoreError> {
        Ok(Self::new(kind.parse()?, id))
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::Hub(_) => CategoryKind::Hub,
            Category::Transport(_) => CategoryKind::Transport,
        }
    }

    pub fn id(&self) -> &CategoryId {
        match self {
            Category::Hub(id) | Category::Transport(id) => id,
        }
    }
}

/// Blake3 digest of a document's canonical bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentDigest(pub [u8; 32]);

impl DocumentDigest {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for DocumentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentDigest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for DocumentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
