pub mod factory;
pub mod http_client_factory;
pub mod mock;
pub mod prediction_api;

pub use factory::ServiceFactory;
pub use http_client_factory::HttpClientFactory;
