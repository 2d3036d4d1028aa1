mod agent;
mod message;
mod venue;

pub use agent::{Agent, AgentStatus, Task, TaskStatus};
pub use message::{Message, Sender};
pub use venue::{Venue, MISSING_DISTANCE_KM};
