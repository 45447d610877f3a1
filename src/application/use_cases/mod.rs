/// Use cases module containing application business logic orchestration
mod inspect_bundles;

pub use inspect_bundles::{image_file_name, InspectBundlesUseCase};
