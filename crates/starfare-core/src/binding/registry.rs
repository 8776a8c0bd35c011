//! Field descriptors and the binding registry.
//!
//! A configuration type declares its bindable fields once, as a table of
//! [`Field`] entries. [`Registry::build`] turns that table into an ordered,
//! case-insensitive lookup from external name to descriptor and accessor.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use bitflags::bitflags;
use thiserror::Error;

use super::value::{Slot, ValueKind};

bitflags! {
    /// Semantic flags attached to a bindable field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// Must be supplied by the CLI or the config file.
        const REQUIRED = 1;
        /// Accumulates values instead of replacing them.
        const REPEATED = 1 << 1;
        /// Never show the initial value as a default in help output.
        const NO_DEFAULT = 1 << 2;
    }
}

/// Hands out a typed view of one field of `T`.
pub type Accessor<T> = for<'a> fn(&'a mut T) -> Slot<'a>;

/// One entry of a configuration type's declaration table.
pub struct Field<T> {
    name: &'static str,
    flags: FieldFlags,
    description: &'static str,
    access: Accessor<T>,
}

impl<T> Field<T> {
    /// Declares a field bound to `name`.
    #[must_use]
    pub const fn new(name: &'static str, access: Accessor<T>) -> Self {
        Self {
            name,
            flags: FieldFlags::empty(),
            description: "",
            access,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.flags = self.flags.union(FieldFlags::REQUIRED);
        self
    }

    /// Marks the field as repeated. The storage must be a sequence.
    #[must_use]
    pub const fn repeated(mut self) -> Self {
        self.flags = self.flags.union(FieldFlags::REPEATED);
        self
    }

    /// Hides the initial value from help output.
    #[must_use]
    pub const fn no_default(mut self) -> Self {
        self.flags = self.flags.union(FieldFlags::NO_DEFAULT);
        self
    }

    /// Sets the help description.
    #[must_use]
    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// A configuration object whose fields can be bound from text.
pub trait Bindable: Default {
    /// The declaration table, in help order.
    fn bindings() -> Vec<Field<Self>>;

    /// Whether the bound values ask for usage output instead of a run.
    fn help_requested(&self) -> bool {
        false
    }

    /// Config file to overlay after the CLI tokens, if one was named.
    fn config_path(&self) -> Option<&Path> {
        None
    }
}

/// Resolved metadata for one bindable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// User-facing name, as declared.
    pub external_name: &'static str,
    /// Flags after registry normalization.
    pub flags: FieldFlags,
    /// Kind values are converted to.
    pub kind: ValueKind,
    /// Help text.
    pub description: &'static str,
    /// Default shown in help, if any.
    pub default_display: Option<String>,
}

impl FieldDescriptor {
    /// Whether the field must be supplied.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.flags.contains(FieldFlags::REQUIRED)
    }

    /// Whether the field accumulates values.
    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        self.flags.contains(FieldFlags::REPEATED)
    }
}

/// A declaration table that cannot be turned into a registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two fields share a case-insensitive name.
    #[error("duplicate argument name '{0}'")]
    DuplicateName(String),
    /// A field is flagged repeated but its storage holds a single value.
    #[error("argument '{0}' is flagged repeated but is not backed by a list")]
    RepeatedOnScalar(String),
}

struct Entry<T> {
    descriptor: FieldDescriptor,
    access: Accessor<T>,
}

/// Ordered, case-insensitive map from external name to field binding.
pub struct Registry<T> {
    entries: Vec<Entry<T>>,
    index: HashMap<String, usize>,
}

impl<T: Bindable> Registry<T> {
    /// Builds the registry from `T`'s declaration table.
    pub fn build() -> Result<Self, RegistryError> {
        Self::from_fields(T::bindings())
    }
}

impl<T: Default> Registry<T> {
    /// Builds a registry from an explicit table, probing storage shapes and
    /// defaults on `T::default()`.
    pub fn from_fields(fields: Vec<Field<T>>) -> Result<Self, RegistryError> {
        let mut probe = T::default();
        let mut entries = Vec::with_capacity(fields.len());
        let mut index = HashMap::with_capacity(fields.len());

        for field in fields {
            let slot = (field.access)(&mut probe);
            let mut flags = field.flags;

            if slot.is_sequence() {
                flags |= FieldFlags::REPEATED;
            } else if flags.contains(FieldFlags::REPEATED) {
                return Err(RegistryError::RepeatedOnScalar(field.name.to_owned()));
            }

            let default_display = if flags
                .intersects(FieldFlags::REQUIRED | FieldFlags::NO_DEFAULT)
            {
                None
            } else {
                slot.render()
            };

            let key = field.name.to_lowercase();
            if index.insert(key.clone(), entries.len()).is_some() {
                return Err(RegistryError::DuplicateName(key));
            }

            entries.push(Entry {
                descriptor: FieldDescriptor {
                    external_name: field.name,
                    flags,
                    kind: slot.kind(),
                    description: field.description,
                    default_display,
                },
                access: field.access,
            });
        }

        Ok(Self { entries, index })
    }
}

impl<T> Registry<T> {
    /// Finds a binding by name, ignoring case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<(&FieldDescriptor, Accessor<T>)> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| (&self.entries[i].descriptor, self.entries[i].access))
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fields are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the usage listing: the banner, then one line per field.
    #[must_use]
    pub fn usage(&self, banner: &str) -> String {
        let mut out = String::new();
        out.push_str(banner);
        out.push('\n');
        out.push_str("Arguments: (default value in parenthesis)\n");
        for descriptor in self.descriptors() {
            let default = descriptor
                .default_display
                .as_ref()
                .map(|value| format!("({value})"))
                .unwrap_or_default();
            let line = format!(
                "-{:<15} {:<10} {}",
                descriptor.external_name, default, descriptor.description
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.descriptor))
            .finish()
    }
}
