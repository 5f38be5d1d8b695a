use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub section_number: String,
    pub section_name: String,
}

impl Header {
    pub fn new(section_number: impl Into<String>, section_name: impl Into<String>) -> Self {
        Self {
            section_number: section_number.into(),
            section_name: section_name.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.section_number, self.section_name)
    }
}

/// Fragment `type`. Anything other than `text` or `table` (images, for
/// example) is kept verbatim so the fragment still lists and renders.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FragmentKind {
    Text,
    Table,
    Other(String),
}

impl FragmentKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Table => "table",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for FragmentKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "text" => Self::Text,
            "table" => Self::Table,
            _ => Self::Other(kind),
        }
    }
}

impl From<FragmentKind> for String {
    fn from(kind: FragmentKind) -> Self {
        match kind {
            FragmentKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(rename = "type")]
    pub kind: FragmentKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub page: Option<u32>,
}

impl Fragment {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Text,
            content: content.into(),
            page: None,
        }
    }

    pub fn table(content: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Table,
            content: content.into(),
            page: None,
        }
    }

    pub fn other(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::from(kind.into()),
            content: content.into(),
            page: None,
        }
    }

    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Fragment payloads arrive either bare or wrapped in a paged response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FragmentPayload {
    Bare(Vec<Fragment>),
    Paged { items: Vec<Fragment> },
}

impl FragmentPayload {
    pub fn into_fragments(self) -> Vec<Fragment> {
        match self {
            Self::Bare(items) => items,
            Self::Paged { items } => items,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Combo,
    NumberAndName,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpan {
    pub section_number: String,
    pub text: String,
    /// False when the start line was not located and a fallback applied.
    pub matched: bool,
    /// Tier that located the start line; `None` when unmatched or when the
    /// locator has no tiers.
    pub tier: Option<MatchTier>,
}

impl SectionSpan {
    pub fn is_low_confidence(&self) -> bool {
        !self.matched
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub section_number: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub section: Option<String>,
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub specification: String,
    #[serde(default)]
    pub domain: String,
}

impl SpecRecord {
    /// `section_number`, or the legacy `section` field when that is absent.
    pub fn section_key(&self) -> Option<&str> {
        self.section_number
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| self.section.as_deref().filter(|value| !value.is_empty()))
    }
}

/// Extraction models sometimes emit section numbers as JSON numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(value) => value,
        Raw::Integer(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
    }))
}
