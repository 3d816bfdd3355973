use serde_json::Value;
use std::fmt;

/// Reads one field off an entity as JSON.
pub type Accessor<T> = fn(&T) -> serde_json::Result<Value>;

/// One public, readable field of an entity type.
pub struct PropertyDescriptor<T> {
    name: &'static str,
    key: String,
    accessor: Accessor<T>,
}

impl<T> PropertyDescriptor<T> {
    /// Creates a descriptor exposing `name`, read through `accessor`.
    pub fn new(name: &'static str, accessor: Accessor<T>) -> Self {
        Self {
            name,
            key: name.to_lowercase(),
            accessor,
        }
    }

    /// The field name as it appears in shaped output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Lowercased name used for case-insensitive matching.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the current value of this field off `entity`.
    pub fn read(&self, entity: &T) -> serde_json::Result<Value> {
        (self.accessor)(entity)
    }
}

impl<T> Clone for PropertyDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            key: self.key.clone(),
            accessor: self.accessor,
        }
    }
}

impl<T> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A type whose fields can be projected into a [`crate::ShapedRecord`].
///
/// Usually implemented through [`crate::shapeable!`]. Implement by hand when a
/// field needs a computed value or a custom JSON form.
pub trait Shapeable: 'static {
    /// Enumerates the readable fields in declaration order.
    ///
    /// Called at most once per cache for each type; the result is reused.
    fn properties() -> Vec<PropertyDescriptor<Self>>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Name used in logs and errors.
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

/// Implements [`Shapeable`] for a struct from a list of its fields.
///
/// Every listed field must implement `serde::Serialize`. A field is exposed
/// under its identifier unless renamed with `as`:
///
/// ```
/// use fieldshape::{shapeable, FieldShaper};
///
/// struct Habit {
///     id: u32,
///     name: String,
///     length: u32,
/// }
///
/// shapeable!(Habit { id as "Id", name as "Name", length as "Length" });
///
/// let habit = Habit { id: 1, name: "Run".into(), length: 30 };
/// let record = FieldShaper::new().shape_one(&habit, Some("name")).unwrap();
/// assert_eq!(record.get("Name"), Some(&serde_json::json!("Run")));
/// assert_eq!(record.len(), 1);
/// ```
#[macro_export]
macro_rules! shapeable {
    ($ty:ty { $($field:ident $(as $name:literal)?),* $(,)? }) => {
        impl $crate::Shapeable for $ty {
            fn properties() -> ::std::vec::Vec<$crate::PropertyDescriptor<Self>> {
                ::std::vec![
                    $(
                        $crate::PropertyDescriptor::new(
                            $crate::__shape_name!($field $(, $name)?),
                            |entity: &Self| $crate::__private::serde_json::to_value(&entity.$field),
                        )
                    ),*
                ]
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __shape_name {
    ($field:ident) => {
        ::core::stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}
