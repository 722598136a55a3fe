// Library root for the `tycoon` binary: HTTP service, CLI, and CSV export.

pub mod cli;
pub mod export;
pub mod request;
pub mod server;
