// Service exports
pub mod directory;
pub mod leads;
pub mod session;

pub use directory::{DirectoryClient, DirectoryCollections, DirectoryError};
pub use leads::{AssessmentLead, LeadStore, LeadStoreError};
pub use session::{SessionStore, SessionStoreError};
