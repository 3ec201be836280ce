//! Workspace defaults.

use serde::{Deserialize, Serialize};

/// Schedule body of the first-run sample workspace.
pub const SAMPLE_CONTENT: &str = "AI OCR:
- BA, 2025-10-01, 2025-11-30: Andy 0.3, Ben 0.8, Cat 0.5
- SA, --, 2026-02: Andy 0.3, Danny 0.6, Elsa 0.2
- SD, --, 2026-04: Andy 0.6, Elsa 0.2, Frank 0.2
- Dev, 2026-03, 2026-05: Andy 0.1, Elsa 0.6, Frank 0.6
- Sit, --, 2026-06: Elsa 0.3, Frank 0.3
- Uat, --, 2026-07: Elsa 0.1, Frank 0.1, Ben 0.7, Cat 0.4
Staff Portal:
- BA/SA, 2026-01, 2026-06: Andy 0.3, Monica 0.7, Amber 0.4
- SD/Dev, 2026-03, 2026-09: Andy 0.2, Amber 0.7, Kevin 0.7
- Sit/Uat, --, 2026-11: Amber 0.2, Kevin 0.2, Monica 0.5, Norman 0.5";

/// Names and content used when the collection has to invent a workspace.
///
/// Missing keys fall back to [`WorkspaceConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Base name for [`Workspaces::create`](super::Workspaces::create) without a name.
    pub default_name: String,
    /// Name for imported documents without a header.
    pub shared_name: String,
    /// Name for a migrated single-document store without a header.
    pub legacy_name: String,
    /// Name of the first-run sample workspace.
    pub sample_name: String,
    /// Body of the first-run sample workspace.
    pub sample_content: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_name: "New Project".to_string(),
            shared_name: "Shared Project".to_string(),
            legacy_name: "Default Workspace".to_string(),
            sample_name: "Sample Project".to_string(),
            sample_content: SAMPLE_CONTENT.to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Sets the base name for new workspaces.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    /// Sets the fallback name for header-less imports.
    pub fn with_shared_name(mut self, name: impl Into<String>) -> Self {
        self.shared_name = name.into();
        self
    }

    /// Sets the sample workspace name and body.
    pub fn with_sample(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.sample_name = name.into();
        self.sample_content = content.into();
        self
    }
}
