pub(crate) mod editing_session;

pub use editing_session::{
    EditingSession, GenerationHandle, Notification, NotificationLevel, SessionId, SessionOpts,
};
