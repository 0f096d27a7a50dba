mod http_user_adapter;

pub use http_user_adapter::HttpUserAdapter;
