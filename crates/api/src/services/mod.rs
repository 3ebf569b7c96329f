//! Application services.

pub mod automation;
pub mod email;
pub mod orphan_scan;

pub use automation::AutomationService;
pub use email::{EmailError, EmailService};
pub use orphan_scan::{OrphanReport, OrphanScanner};
