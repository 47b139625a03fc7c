mod user_federation_sender;


pub use user_federation_sender::{UserFederationSender, UserFederationSenderDependencies};
