mod loading;
mod session;

pub use loading::{LoadingRotation, LOADING_MESSAGES};
pub use session::{
    reply_message, venues_found_text, ChatSession, SessionState, APOLOGY, FALLBACK_REPLY,
    GREETING,
};
