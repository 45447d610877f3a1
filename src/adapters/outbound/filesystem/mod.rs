/// Filesystem adapters for run outputs
mod output_directory;

pub use output_directory::OutputDirectory;
