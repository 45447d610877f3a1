/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (live server, renderer, file system, console).
pub mod bundle_data_source;
pub mod graph_renderer;
pub mod output_writer;
pub mod progress_reporter;

pub use bundle_data_source::{BundleDataSource, Collected, ParseOutcome, SkipReason, SkippedEntry};
pub use graph_renderer::{GraphRenderer, Layout};
pub use output_writer::OutputWriter;
pub use progress_reporter::ProgressReporter;
