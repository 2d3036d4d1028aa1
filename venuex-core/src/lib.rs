#![allow(clippy::derivable_impls, clippy::len_zero)]

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod links;
pub mod mock;
pub mod models;
pub mod venues;

pub use chat::{
    reply_message, venues_found_text, ChatSession, LoadingRotation, SessionState, APOLOGY,
    FALLBACK_REPLY, GREETING, LOADING_MESSAGES,
};
pub use client::{ChatBackend, ChatReply, ChatRequest, HealthStatus, HttpChatClient};
pub use config::{
    ensure_data_dir, get_config_dir, get_data_dir, ApiConfig, ChatConfig, ConfigLoadError,
    LoggingConfig, TuiConfig, VenuexConfig,
};
pub use error::{CliErrorDisplay, VenuexError, VenuexResult};
pub use links::{open_link, SafeLink};
pub use mock::{
    agents, find_agent_by_id, load_venues_from_file, sample_venues, tasks, ExampleQuery,
    EXAMPLE_QUERIES,
};
pub use models::{Agent, AgentStatus, Message, Sender, Task, TaskStatus, Venue};
pub use venues::{filter_and_sort, SortKey, VenueFilter, VenueStats, VenueView};
