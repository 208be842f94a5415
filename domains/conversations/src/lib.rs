//! Conversations domain: client-creator chat threads, realtime fan-out

pub mod api;
pub mod domain;
pub mod realtime;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{ChatMessage, Conversation};

// Re-export realtime types
pub use realtime::{run_change_listener, RealtimeEvent, RealtimeEventKind, RealtimeHub};

// Re-export repository types
pub use repository::{ConversationRepository, ConversationsRepositories, MessageRepository};

// Re-export API types
pub use api::routes;
pub use api::ConversationsState;
