pub mod notification_client;
pub mod scenario_catalog;
pub mod scenario_runner;

pub use notification_client::{NotificationClient, NotificationSender};
pub use scenario_catalog::ScenarioCatalog;
pub use scenario_runner::ScenarioRunner;
