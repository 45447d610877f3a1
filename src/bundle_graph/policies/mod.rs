/// Domain policies - configurable rules applied to scraped bundle names
mod namespace_filter;

pub use namespace_filter::NamespaceFilter;
