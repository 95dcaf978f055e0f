pub mod auth;
pub mod explore;
pub mod publish;

pub use auth::{AuthCommands, auth_command};
pub use explore::{ExploreCommands, explore_command};
pub use publish::{PublishCommands, publish_command};
