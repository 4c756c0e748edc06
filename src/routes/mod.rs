mod contact;
mod health;

pub use contact::{contact, json_config, method_not_allowed, ContactError, ContactReply};
pub use health::{health, index, HealthStatus};
