pub mod backend;
pub mod config;
pub mod error;
pub mod fetch;
pub mod paths;
pub mod prompt;
pub mod templates;
pub mod writer;

// Re-export commonly used types
pub use backend::Backend;
pub use config::Config;
pub use error::ScaffoldError;
pub use fetch::{FetchReport, Fetcher, HttpGet, RemoteFileSpec, ReqwestClient};
pub use writer::{FileSink, LocalFs, MemoryFs};
