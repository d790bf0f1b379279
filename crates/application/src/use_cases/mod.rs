//! Application use cases (run orchestration).

mod execute_probe;
mod inspect_server_log;
mod run_suite;

pub use execute_probe::ExecuteProbe;
pub use inspect_server_log::InspectServerLog;
pub use run_suite::RunSuite;

#[cfg(test)]
pub(crate) mod test_support;
