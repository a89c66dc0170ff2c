// Adapters layer: concrete implementations of the domain ports (http source, local storage).

pub mod http;
pub mod storage;

pub use http::HttpDoctorSource;
pub use storage::LocalStorage;
