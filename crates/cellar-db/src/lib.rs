mod catalog;
mod enrich;
mod error;
mod model;

pub use catalog::{
    BEER_DESIGN, BREWERY_DESIGN, BY_NAME_VIEW, BeerFields, BreweryFields, Catalog, beer_id,
};
pub use enrich::enrich;
pub use error::CatalogError;
pub use model::{Beer, Brewery};
