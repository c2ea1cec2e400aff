//! Blocking client for the PLM part catalog.
//!
//! Layers, leaf to root: [`transport`] (one HTTP request per call, errors
//! in-band), [`api`] (typed endpoints), [`host`] (the CAD application seam),
//! [`session`] (upsert decision and hierarchy navigation).

pub mod api;
pub mod error;
pub mod fixtures;
pub mod history;
pub mod host;
pub mod memory_host;
pub mod session;
pub mod settings;
pub mod transport;
pub mod upload;

pub use error::{PlmError, Result};
pub use history::NavigationHistory;
pub use host::{CadHost, DocumentId, NativeObject, ObjectRef, Placement};
pub use memory_host::MemoryHost;
pub use session::{Direction, LoadMode, LoadOutcome, Navigation, SearchResult, Session, UploadAction, UploadOutcome};
pub use settings::Settings;
pub use transport::{HttpMethod, HttpTransport, Transport};
