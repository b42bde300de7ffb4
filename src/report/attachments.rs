//! Attachment manifest
//!
//! Every file the run leaves in the attachments directory is declared in a
//! manifest the warehouse reads to route the artifacts: the execution log to
//! developers, the run summary to the end user, the report to the next
//! pipeline stage.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// How the warehouse routes an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentRole {
    /// Developer-facing artifact, offered as a download
    Downloadable,
    /// End-user feedback shown in the warehouse UI
    Feedback,
    /// Primary model output consumed downstream
    Primary,
}

/// One declared attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// File name inside the attachments directory
    pub filename: String,
    /// MIME type of the file
    pub content_type: String,
    /// Routing role
    pub role: AttachmentRole,
}

impl Attachment {
    /// Declare an attachment.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        role: AttachmentRole,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            role,
        }
    }
}

/// Write the manifest as a JSON list.
pub fn write_manifest(attachments: &[Attachment], path: &Path) -> anyhow::Result<()> {
    let json =
        serde_json::to_string_pretty(attachments).context("serializing attachment manifest")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
