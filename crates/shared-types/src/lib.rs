use serde::{Deserialize, Serialize};

/// Notebook as returned by `GET /me/onenote/notebooks?$select=id,displayName`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookRef {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Section as returned by the notebook sections endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Collection envelope used by every Graph list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(
        rename = "@odata.nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_link: Option<String>,
}

/// Anything with a display name that can be looked up by it.
pub trait Named {
    fn display_name(&self) -> &str;
    fn id(&self) -> &str;
}

impl Named for NotebookRef {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for SectionRef {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Returns the id of the first item whose display name matches exactly.
pub fn first_id_by_name<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a str> {
    items
        .iter()
        .find(|item| item.display_name() == name)
        .map(Named::id)
}

// ============================================================================
// Page creation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    Created,
    Failed {
        /// `None` when the request never got an HTTP response
        status: Option<u16>,
        body: String,
    },
}

/// Result of one page-creation attempt inside a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCreationResult {
    pub title: String,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

impl PageCreationResult {
    pub fn created(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outcome: PageOutcome::Created,
        }
    }

    pub fn failed(title: impl Into<String>, status: Option<u16>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outcome: PageOutcome::Failed {
                status,
                body: body.into(),
            },
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self.outcome, PageOutcome::Created)
    }
}
