/// InspectionRequest - Internal request DTO for the bundle inspection use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionRequest {
    /// File stem of the full-graph image
    pub root_name: String,
    /// Whether any images are rendered at all
    pub render_images: bool,
    /// Upper bound on in-flight data source queries and renders
    pub concurrency: usize,
    /// Name of the statistics file inside the output directory
    pub stats_file_name: String,
}

impl InspectionRequest {
    pub fn new(root_name: impl Into<String>, render_images: bool, concurrency: usize) -> Self {
        Self {
            root_name: root_name.into(),
            render_images,
            concurrency: concurrency.max(1),
            stats_file_name: "stats.log".to_string(),
        }
    }

    pub fn with_stats_file_name(mut self, stats_file_name: impl Into<String>) -> Self {
        self.stats_file_name = stats_file_name.into();
        self
    }
}
