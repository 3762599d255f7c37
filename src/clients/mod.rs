pub mod gcs_client;
pub mod sendgrid_client;
pub mod terra_client;

pub use gcs_client::GcsClient;
pub use sendgrid_client::{MailApi, SendGridClient};
pub use terra_client::{TerraClient, WorkspaceApi};
