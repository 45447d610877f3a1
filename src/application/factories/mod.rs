mod data_source_factory;
mod renderer_factory;

pub use data_source_factory::DataSourceFactory;
pub use renderer_factory::RendererFactory;
