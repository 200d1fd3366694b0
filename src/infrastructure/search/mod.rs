mod catalog_search_provider;

pub use catalog_search_provider::CatalogSearchProvider;
