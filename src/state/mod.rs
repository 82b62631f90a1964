//! Client state module
//!
//! This module holds the session, its persistence, navigation history and
//! the CRUD page state machine.

pub mod context;
pub mod controller;
pub mod forms;
pub mod navigation;
pub mod session;
pub mod storage;

pub use context::{AppContext, EventsPage, MembersPage};
pub use controller::{CrudController, CrudResource, MutationOutcome, PageState};
pub use forms::{FormData, RegistrationForm};
pub use navigation::{Location, Navigator};
pub use session::{Session, SessionContext, SessionStore};
pub use storage::{FileBackend, MemoryBackend, PersistedSession, StateStorage, StorageBackend};
