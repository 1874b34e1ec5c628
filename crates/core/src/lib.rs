pub mod context;
pub mod error;
pub mod types;

pub use context::PolicyContext;
pub use error::TollgateError;
pub use types::{ClientIp, CompanyId, Namespace, TenantId, UserId};
