mod directory;
mod factory;
mod http_auth_adapter;
mod mock_auth_adapter;

pub use directory::{DirectoryEntry, UserDirectory, default_seed_users};
pub use factory::AuthPortFactory;
pub use http_auth_adapter::HttpAuthAdapter;
pub use mock_auth_adapter::{MockAuthAdapter, MockAuthSettings, RefreshTokenPolicy, SimulatedDelays};
