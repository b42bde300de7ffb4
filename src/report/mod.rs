//! Run outputs: narrative log, report serialization, attachment manifest.

pub mod attachments;
pub mod narrative;
pub mod output;

pub use attachments::{Attachment, AttachmentRole, write_manifest};
pub use narrative::{LogEntry, RunLog};
pub use output::{write_output_csv, write_output_json};
