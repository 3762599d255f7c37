pub mod config_service;
pub mod notification_service;
pub mod reanalysis;
pub mod storage_service;

pub use config_service::ConfigService;
pub use notification_service::{NotificationReport, NotificationService};
pub use reanalysis::{analyzable_entities, needs_reanalysis};
pub use storage_service::StorageService;
