use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable identifier of a page record.
/// Compared by exact equality, no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageId(pub String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Plain scalar read as text; YAML turns `2024` into a number
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

/// Accepted spellings of an identifier on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    /// "b", or a bare number
    Plain(Scalar),
    /// { "sys": { "id": "b" } }
    Link { sys: SysRef },
    /// { "id": "b" }
    Sys { id: String },
}

#[derive(Deserialize)]
struct SysRef {
    id: String,
}

impl<'de> Deserialize<'de> for PageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = match IdRepr::deserialize(deserializer)? {
            IdRepr::Plain(id) => id.into_string(),
            IdRepr::Link { sys } => sys.id,
            IdRepr::Sys { id } => id,
        };
        Ok(PageId(id))
    }
}

/// Read-only snapshot of a page entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(alias = "sys")]
    pub id: PageId,
    #[serde(default, deserialize_with = "scalar_string")]
    pub slug: Option<String>,
    /// None means this page is a hierarchy root
    #[serde(default, alias = "parentRef", skip_serializing_if = "Option::is_none")]
    pub parent: Option<PageId>,
}

impl Page {
    pub fn new(id: impl Into<PageId>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: Some(slug.into()),
            parent: None,
        }
    }

    /// A record without a slug
    pub fn unnamed(id: impl Into<PageId>) -> Self {
        Self {
            id: id.into(),
            slug: None,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<PageId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// The slug, if present and non-empty
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|slug| !slug.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
