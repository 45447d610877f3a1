use crate::application::dto::{InspectionRequest, InspectionResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// GraphInspectionPort - Inbound port for the bundle inspection use case
///
/// This port defines the interface that external adapters (CLI, API, etc.)
/// use to trigger a run. Progress reporting is not thread-safe, so the
/// returned future is not required to be `Send`.
#[async_trait(?Send)]
pub trait GraphInspectionPort {
    /// Collects the dependency graph and writes its drawings and statistics
    ///
    /// # Errors
    /// Returns an error if:
    /// - The data source cannot be reached or rejects the credentials
    /// - The output directory cannot be created
    /// - The statistics file cannot be written
    async fn inspect(&self, request: InspectionRequest) -> Result<InspectionResponse>;
}
