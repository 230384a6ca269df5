//! Data models for the idcloud CLI

pub mod auth;
pub mod esv;
pub mod export;
pub mod logs;
pub mod paged;
pub mod saml;
pub mod script;
mod session;

pub use export::{ExportEnvelope, ExportMeta, SamlExport};
pub use paged::PagedResult;
pub use saml::{EntityProvider, ProviderLocation, ProviderStub, ScriptRefs};
pub use script::{ScriptBody, ScriptRecord};
pub use session::{realm_path, Session};
