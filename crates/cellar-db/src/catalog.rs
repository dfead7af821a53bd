use std::sync::Arc;

use bson::Document;
use cellar_store::{DocumentStore, ViewQuery};

use crate::enrich::enrich;
use crate::error::CatalogError;
use crate::model::{Beer, Brewery};

pub const BEER_DESIGN: &str = "beer";
pub const BREWERY_DESIGN: &str = "brewery";
pub const BY_NAME_VIEW: &str = "by_name";

/// Validated input for creating or overwriting a beer. `extra` carries any
/// additional free-form fields straight through to the stored document.
#[derive(Debug, Clone, Default)]
pub struct BeerFields {
    pub name: String,
    pub brewery_id: String,
    pub extra: Document,
}

impl BeerFields {
    fn into_document(self) -> Document {
        let mut doc = self.extra;
        doc.insert("type", "beer");
        doc.insert("name", self.name);
        doc.insert("brewery_id", self.brewery_id);
        doc
    }
}

#[derive(Debug, Clone, Default)]
pub struct BreweryFields {
    pub name: String,
    pub extra: Document,
}

impl BreweryFields {
    fn into_document(self) -> Document {
        let mut doc = self.extra;
        doc.insert("type", "brewery");
        doc.insert("name", self.name);
        doc
    }
}

/// Composite beer id: `<brewery_id>-<normalized name>`.
pub fn beer_id(brewery_id: &str, name: &str) -> String {
    format!("{brewery_id}-{}", normalize_name(name))
}

fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Domain operations over a document store handle. The handle is passed in
/// explicitly at construction; there is no ambient global connection.
pub struct Catalog<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> Catalog<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate, derive the composite id, and insert. No write happens on a
    /// validation failure; an id collision surfaces as `AlreadyExists`.
    pub fn create_beer(&self, fields: BeerFields) -> Result<String, CatalogError> {
        self.validate_beer(&fields)?;
        let id = beer_id(&fields.brewery_id, &fields.name);
        self.store.add(&id, fields.into_document())?;
        Ok(id)
    }

    /// Validate and overwrite. No optimistic concurrency check; the last
    /// write wins.
    pub fn update_beer(&self, id: &str, fields: BeerFields) -> Result<(), CatalogError> {
        self.validate_beer(&fields)?;
        self.store.set(id, fields.into_document())?;
        Ok(())
    }

    fn validate_beer(&self, fields: &BeerFields) -> Result<(), CatalogError> {
        if fields.name.is_empty() {
            return Err(CatalogError::Validation("beer must have a name".into()));
        }
        if fields.brewery_id.is_empty() {
            return Err(CatalogError::Validation(
                "beer must have a brewery id".into(),
            ));
        }
        if self.store.get(&fields.brewery_id)?.is_none() {
            return Err(CatalogError::Validation(format!(
                "brewery id {} not found",
                fields.brewery_id
            )));
        }
        Ok(())
    }

    pub fn get_beer(&self, id: &str) -> Result<Option<Beer>, CatalogError> {
        let Some(doc) = self.store.get(id)? else {
            return Ok(None);
        };
        Ok(Some(Beer::from_doc(id, doc)))
    }

    pub fn create_brewery(&self, fields: BreweryFields) -> Result<String, CatalogError> {
        if fields.name.is_empty() {
            return Err(CatalogError::Validation("brewery must have a name".into()));
        }
        let id = normalize_name(&fields.name);
        self.store.add(&id, fields.into_document())?;
        Ok(id)
    }

    pub fn update_brewery(&self, id: &str, fields: BreweryFields) -> Result<(), CatalogError> {
        if fields.name.is_empty() {
            return Err(CatalogError::Validation("brewery must have a name".into()));
        }
        self.store.set(id, fields.into_document())?;
        Ok(())
    }

    pub fn get_brewery(&self, id: &str) -> Result<Option<Brewery>, CatalogError> {
        let Some(doc) = self.store.get(id)? else {
            return Ok(None);
        };
        Ok(Some(Brewery::from_doc(id, doc)))
    }

    /// Delete by primary key, beer or brewery alike. A missing id surfaces
    /// as `NotFound`.
    pub fn delete(&self, id: &str) -> Result<(), CatalogError> {
        self.store.remove(id)?;
        Ok(())
    }

    pub fn list_beers(&self, limit: usize) -> Result<Vec<Beer>, CatalogError> {
        let rows = self.store.query(
            BEER_DESIGN,
            BY_NAME_VIEW,
            &ViewQuery {
                limit: Some(limit),
                ..Default::default()
            },
        )?;
        Ok(enrich(self.store.as_ref(), rows)?)
    }

    /// Name-prefix search with the full documents attached to each row.
    pub fn search_beers(&self, prefix: &str, limit: usize) -> Result<Vec<Beer>, CatalogError> {
        let rows = self.store.query(
            BEER_DESIGN,
            BY_NAME_VIEW,
            &ViewQuery {
                key_prefix: Some(prefix.to_string()),
                limit: Some(limit),
                include_docs: true,
            },
        )?;
        Ok(enrich(self.store.as_ref(), rows)?)
    }

    pub fn list_breweries(&self, limit: usize) -> Result<Vec<Brewery>, CatalogError> {
        let rows = self.store.query(
            BREWERY_DESIGN,
            BY_NAME_VIEW,
            &ViewQuery {
                limit: Some(limit),
                ..Default::default()
            },
        )?;
        Ok(rows
            .into_iter()
            .map(|row| Brewery::new(row.id, row.key))
            .collect())
    }

    pub fn search_breweries(&self, prefix: &str, limit: usize) -> Result<Vec<Brewery>, CatalogError> {
        let rows = self.store.query(
            BREWERY_DESIGN,
            BY_NAME_VIEW,
            &ViewQuery {
                key_prefix: Some(prefix.to_string()),
                limit: Some(limit),
                include_docs: true,
            },
        )?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let mut brewery = Brewery::new(row.id, row.key);
                brewery.doc = row.doc;
                brewery
            })
            .collect())
    }
}
