/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod inspection_request;
mod inspection_response;

pub use inspection_request::InspectionRequest;
pub use inspection_response::{InspectionResponse, RenderFailure};
