pub mod agent_details;
pub mod agents;
pub mod chat;
pub mod help;
pub mod venues;
