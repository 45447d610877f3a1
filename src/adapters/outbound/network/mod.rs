/// Network adapters for talking to the live server
mod felix_console_client;
mod parsers;
mod retrying_source;
mod shell_session_client;

pub use felix_console_client::{ConsoleEndpoint, FelixConsoleClient};
pub use retrying_source::RetryingDataSource;
pub use shell_session_client::{ShellEndpoint, ShellSessionClient};
