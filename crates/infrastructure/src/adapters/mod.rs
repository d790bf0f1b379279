//! Infrastructure adapters

mod log_file;
mod reqwest_client;

pub use log_file::FileLogSource;
pub use reqwest_client::ReqwestHttpClient;
