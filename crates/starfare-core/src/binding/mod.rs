//! Declarative argument binding.
//!
//! A configuration type implements [`Bindable`] by listing its fields once:
//! external name, flags, help text and an accessor into its storage. From that
//! table the crate derives parsing, required-field validation and usage output.
//!
//! ```rust
//! use starfare_core::binding::{ArgumentParser, Bindable, Field, Registry, Slot};
//!
//! #[derive(Default)]
//! struct Opts {
//!     from: String,
//!     to: Vec<String>,
//! }
//!
//! impl Bindable for Opts {
//!     fn bindings() -> Vec<Field<Self>> {
//!         type F = Field<Opts>;
//!         vec![
//!             F::new("From", |o| Slot::Text(&mut o.from)).required(),
//!             F::new("To", |o| Slot::TextList(&mut o.to)),
//!         ]
//!     }
//! }
//!
//! let registry = Registry::<Opts>::build()?;
//! let mut opts = Opts::default();
//! ArgumentParser::new(&registry, &mut opts).parse(&["-from", "CPH", "-To", "JFK,LAX"])?;
//! assert_eq!(opts.to, ["JFK", "LAX"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod parser;
mod registry;
mod value;

pub use parser::{ArgumentParser, HELP_BANNER, OPTION_MARKER, ParseError};
pub use registry::{Accessor, Bindable, Field, FieldDescriptor, FieldFlags, Registry, RegistryError};
pub use value::{DATE_FORMAT, Slot, ValueKind};
