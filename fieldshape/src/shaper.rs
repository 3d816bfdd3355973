//! The shaping service: project entities onto a requested field list.
//!
//! Shaping never fails on unknown names by default; they simply match nothing.
//! Callers that want to reject such requests run [`FieldShaper::validate`] or
//! [`FieldShaper::check`] first, or turn on [`ShaperConfig::strict`].

use crate::cache::PropertyCache;
use crate::descriptor::{PropertyDescriptor, Shapeable};
use crate::error::{ShapeError, ShapeResult};
use crate::record::ShapedRecord;
use crate::selection::FieldSelection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Separator between names in a field list.
pub const DEFAULT_SEPARATOR: char = ',';

/// Configuration for a [`FieldShaper`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaperConfig {
    /// Character separating names in the field list.
    #[serde(default = "default_separator")]
    pub separator: char,
    /// Fail shaping with [`ShapeError::UnknownFields`] instead of ignoring
    /// names the entity type does not have.
    #[serde(default)]
    pub strict: bool,
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

impl Default for ShaperConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            strict: false,
        }
    }
}

/// Builds reduced-field records from entities.
#[derive(Clone)]
pub struct FieldShaper {
    config: ShaperConfig,
    cache: Arc<PropertyCache>,
}

impl FieldShaper {
    /// Creates a shaper with the default config over the process-wide cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ShaperConfig::default())
    }

    /// Creates a shaper with a custom config over the process-wide cache.
    #[must_use]
    pub fn with_config(config: ShaperConfig) -> Self {
        Self::with_cache(config, PropertyCache::global())
    }

    /// Creates a shaper over a caller-owned cache.
    #[must_use]
    pub fn with_cache(config: ShaperConfig, cache: Arc<PropertyCache>) -> Self {
        Self { config, cache }
    }

    #[must_use]
    pub fn config(&self) -> &ShaperConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<PropertyCache> {
        &self.cache
    }

    /// Parses a field list using this shaper's separator.
    #[must_use]
    pub fn parse(&self, fields: Option<&str>) -> FieldSelection {
        FieldSelection::parse_with(fields, self.config.separator)
    }

    /// Shapes a single entity.
    pub fn shape_one<T: Shapeable>(&self, entity: &T, fields: Option<&str>) -> ShapeResult<ShapedRecord> {
        let (properties, selection) = self.resolve::<T>(fields)?;
        build_record(entity, &select(&properties, &selection))
    }

    /// Shapes every entity of a sequence, in order.
    ///
    /// The field list is parsed and matched against `T`'s properties once for
    /// the whole sequence, which is consumed a single time.
    pub fn shape_many<'a, T, I>(&self, entities: I, fields: Option<&str>) -> ShapeResult<Vec<ShapedRecord>>
    where
        T: Shapeable,
        I: IntoIterator<Item = &'a T>,
    {
        let (properties, selection) = self.resolve::<T>(fields)?;
        let selected = select(&properties, &selection);
        entities
            .into_iter()
            .map(|entity| build_record(entity, &selected))
            .collect()
    }

    /// Whether every requested name is a property of `T`.
    ///
    /// An absent, empty, or blank field list is always valid.
    pub fn validate<T: Shapeable>(&self, fields: Option<&str>) -> bool {
        self.unknown_fields::<T>(fields).is_empty()
    }

    /// Requested names that match no property of `T`, in request order.
    pub fn unknown_fields<T: Shapeable>(&self, fields: Option<&str>) -> Vec<String> {
        let selection = self.parse(fields);
        if selection.is_empty() {
            return Vec::new();
        }

        let properties = self.cache.properties::<T>();
        let unknown: Vec<String> = selection
            .iter()
            .filter(|name| {
                let key = name.to_lowercase();
                !properties.iter().any(|property| property.key() == key)
            })
            .map(str::to_owned)
            .collect();

        if !unknown.is_empty() {
            debug!(
                entity_type = T::type_name(),
                unknown = ?unknown,
                "field selection names unknown properties"
            );
        }
        unknown
    }

    /// Like [`validate`](Self::validate), but reports which names are unknown.
    pub fn check<T: Shapeable>(&self, fields: Option<&str>) -> ShapeResult<()> {
        let unknown = self.unknown_fields::<T>(fields);
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ShapeError::UnknownFields {
                entity_type: T::type_name(),
                fields: unknown,
            })
        }
    }

    fn resolve<T: Shapeable>(
        &self,
        fields: Option<&str>,
    ) -> ShapeResult<(Arc<Vec<PropertyDescriptor<T>>>, FieldSelection)> {
        if self.config.strict {
            self.check::<T>(fields)?;
        }
        Ok((self.cache.properties::<T>(), self.parse(fields)))
    }
}

impl Default for FieldShaper {
    fn default() -> Self {
        Self::new()
    }
}

/// The descriptors a selection keeps, in property order.
fn select<'p, T>(
    properties: &'p [PropertyDescriptor<T>],
    selection: &FieldSelection,
) -> Vec<&'p PropertyDescriptor<T>> {
    properties
        .iter()
        .filter(|property| selection.is_empty() || selection.contains_key(property.key()))
        .collect()
}

fn build_record<T: Shapeable>(entity: &T, properties: &[&PropertyDescriptor<T>]) -> ShapeResult<ShapedRecord> {
    let mut record = ShapedRecord::with_capacity(properties.len());
    for property in properties {
        let value = property.read(entity).map_err(|source| ShapeError::FieldValue {
            entity_type: T::type_name(),
            field: property.name(),
            source,
        })?;
        record.insert(property.name(), value);
    }
    Ok(record)
}
