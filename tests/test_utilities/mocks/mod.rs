/// Mock implementations for testing
mod mock_data_source;
mod mock_progress_reporter;
mod recording_renderer;

pub use mock_data_source::MockBundleDataSource;
pub use mock_progress_reporter::MockProgressReporter;
pub use recording_renderer::RecordingRenderer;
