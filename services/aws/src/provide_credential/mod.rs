mod default;
pub use default::DefaultCredentialProvider;

mod ecs;
pub use ecs::EcsCredentialProvider;

mod env;
pub use env::EnvCredentialProvider;

mod imds;
pub use imds::IMDSv2CredentialProvider;

mod profile;
pub use profile::ProfileCredentialProvider;

#[path = "static.rs"]
mod static_provider;
pub use static_provider::StaticCredentialProvider;
