pub mod entity;
pub mod gcs_path;
pub mod mail;
pub mod method_config;
pub mod submission;
pub mod workspace;

pub use entity::{EntityOperation, EntityRef, EntityUpsert};
pub use gcs_path::GcsPath;
pub use mail::{MailAddress, MailContent, MailMessage, Personalization};
pub use method_config::{MethodConfig, MethodRepoMethod, MethodVersion};
pub use submission::{
    SubmissionRecord, SubmissionRequest, SubmissionResponse, SubmissionStatus, WorkflowStatus,
};
pub use workspace::Workspace;
