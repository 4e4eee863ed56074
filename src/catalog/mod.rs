mod gallery;

use std::collections::HashMap;
use std::slice;

use slotmap::SlotMap;

use crate::error::{CatalogError, Result};
use crate::geometry::{CurveDefinition, ProjectedPath};
use crate::operations::{SampleCurve, SampleParams};

pub use gallery::DEFAULT_CURVE;

slotmap::new_key_type! {
    /// Handle to an entry in a [`CurveCatalog`].
    pub struct CurveKey;
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    id: String,
    definition: CurveDefinition,
}

/// Immutable catalog of curve definitions, keyed by string id.
///
/// Entries keep their insertion order, which callers use for deterministic
/// menu listings. A catalog is built once through [`CatalogBuilder`] and has no
/// mutation API afterwards.
#[derive(Debug, Clone, Default)]
pub struct CurveCatalog {
    curves: SlotMap<CurveKey, CatalogEntry>,
    order: Vec<CurveKey>,
    index: HashMap<String, CurveKey>,
}

impl CurveCatalog {
    /// Starts building a new catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Builds a catalog from `(id, definition)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if an id appears twice.
    pub fn from_entries<I, S>(entries: I) -> std::result::Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, CurveDefinition)>,
        S: Into<String>,
    {
        let mut builder = Self::builder();
        for (id, definition) in entries {
            builder.insert(id, definition)?;
        }
        Ok(builder.build())
    }

    /// Returns the built-in gallery of classic plane curves.
    #[must_use]
    pub fn gallery() -> Self {
        gallery::build()
    }

    /// Returns the definition registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no entry has this id.
    pub fn get(&self, id: &str) -> std::result::Result<&CurveDefinition, CatalogError> {
        let key = self.key(id)?;
        self.get_by_key(key)
    }

    /// Metadata accessor for labeling and styling. Never samples.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no entry has this id.
    pub fn lookup(&self, id: &str) -> Result<&CurveDefinition> {
        Ok(self.get(id)?)
    }

    /// Resolves an id to its handle.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no entry has this id.
    pub fn key(&self, id: &str) -> std::result::Result<CurveKey, CatalogError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::NotFound(id.to_owned()))
    }

    /// Returns the definition behind a handle.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the handle belongs to another catalog.
    pub fn get_by_key(&self, key: CurveKey) -> std::result::Result<&CurveDefinition, CatalogError> {
        self.curves
            .get(key)
            .map(|entry| &entry.definition)
            .ok_or_else(|| CatalogError::NotFound(format!("{key:?}")))
    }

    /// Returns whether an entry with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates `(id, definition)` pairs in insertion order.
    ///
    /// The iterator is lazy; call again to restart.
    #[must_use]
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            curves: &self.curves,
            order: self.order.iter(),
        }
    }

    /// Samples the curve registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is unknown, the parameters are invalid, the
    /// curve's domain is inverted, or a sample evaluates to a non-finite point.
    pub fn sample(&self, id: &str, viewport: f64, step: f64) -> Result<ProjectedPath> {
        self.sample_with(id, SampleParams::new(viewport, step))
    }

    /// Samples the curve registered under `id` with explicit parameters.
    ///
    /// # Errors
    ///
    /// See [`CurveCatalog::sample`].
    pub fn sample_with(&self, id: &str, params: SampleParams) -> Result<ProjectedPath> {
        let definition = self.get(id)?;
        tracing::debug!(curve = id, "sampling catalog entry");
        SampleCurve::new(definition, params).execute()
    }
}

/// Iterator over catalog entries in insertion order.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    curves: &'a SlotMap<CurveKey, CatalogEntry>,
    order: slice::Iter<'a, CurveKey>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, &'a CurveDefinition);

    fn next(&mut self) -> Option<Self::Item> {
        let curves = self.curves;
        self.order.find_map(|&key| {
            curves
                .get(key)
                .map(|entry| (entry.id.as_str(), &entry.definition))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len()))
    }
}

/// Builder for [`CurveCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: CurveCatalog,
}

impl CatalogBuilder {
    /// Adds a definition under `id`, returning its handle.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if `id` is already present.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        definition: CurveDefinition,
    ) -> std::result::Result<CurveKey, CatalogError> {
        let id = id.into();
        if self.catalog.index.contains_key(&id) {
            return Err(CatalogError::DuplicateId(id));
        }
        let key = self.catalog.curves.insert(CatalogEntry {
            id: id.clone(),
            definition,
        });
        self.catalog.order.push(key);
        self.catalog.index.insert(id, key);
        Ok(key)
    }

    /// Finishes the catalog.
    #[must_use]
    pub fn build(self) -> CurveCatalog {
        tracing::debug!(entries = self.catalog.len(), "curve catalog built");
        self.catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LociError;
    use crate::math::Point2;

    fn line(title: &str) -> CurveDefinition {
        CurveDefinition::parametric(title, "", |t| Point2::new(t, 0.0))
    }

    fn small_catalog() -> CurveCatalog {
        CurveCatalog::from_entries([("b", line("B")), ("a", line("A")), ("c", line("C"))]).unwrap()
    }

    #[test]
    fn get_by_id() {
        let catalog = small_catalog();
        assert_eq!(catalog.get("a").unwrap().title(), "A");
        assert!(catalog.contains("c"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let catalog = small_catalog();
        assert!(matches!(
            catalog.get("doesNotExist"),
            Err(CatalogError::NotFound(id)) if id == "doesNotExist"
        ));
        assert!(matches!(
            catalog.lookup("doesNotExist"),
            Err(LociError::Catalog(CatalogError::NotFound(_)))
        ));
    }

    #[test]
    fn entries_keep_insertion_order() {
        let catalog = small_catalog();
        let ids: Vec<&str> = catalog.entries().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        // Restartable.
        assert_eq!(catalog.entries().count(), 3);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut builder = CurveCatalog::builder();
        builder.insert("a", line("A")).unwrap();
        let result = builder.insert("a", line("again"));
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "a"));

        // The first definition is kept.
        assert_eq!(builder.build().get("a").unwrap().title(), "A");
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let result = CurveCatalog::from_entries([("x", line("X")), ("x", line("Y"))]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn builder_returns_usable_keys() {
        let mut builder = CurveCatalog::builder();
        let key = builder.insert("only", line("Only")).unwrap();
        let catalog = builder.build();
        assert_eq!(catalog.get_by_key(key).unwrap().title(), "Only");
    }

    #[test]
    fn key_round_trip() {
        let catalog = small_catalog();
        let key = catalog.key("c").unwrap();
        assert_eq!(catalog.get_by_key(key).unwrap().title(), "C");
    }

    #[test]
    fn foreign_key_is_not_found() {
        let catalog = small_catalog();
        let other = CurveCatalog::default();
        let key = catalog.key("a").unwrap();
        assert!(other.get_by_key(key).is_err());
    }

    #[test]
    fn sample_unknown_id_fails() {
        let catalog = small_catalog();
        assert!(matches!(
            catalog.sample("nope", 1000.0, 0.01),
            Err(LociError::Catalog(CatalogError::NotFound(_)))
        ));
    }

    #[test]
    fn sample_by_id() {
        let catalog = small_catalog();
        let path = catalog.sample("a", 1000.0, 1.0).unwrap();
        assert_eq!(path.len(), 21);
    }

    #[test]
    fn catalog_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CurveCatalog>();
    }
}
