//! # Strongly Typed Architecture
//!
//! Strongly Typed gives record types **declared, typed attributes**. Every write to an
//! attribute either stores a value of the declared type, converts the offered value into
//! it, or fails loudly. There is no silent defaulting.
//!
//! Like any library with a CLI attached, the binary is only one client: everything it does
//! goes through the public types below.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, cli/, wired by main.rs)                │
//! │  - Parses literals and type names, prints results           │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Record Layer (model.rs, attributes.rs)                     │
//! │  - RecordType definitions and their attribute registry      │
//! │  - Record instances, accessors, construction boundary       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Coercion Engine (coercible/)                               │
//! │  - Pure conversion of a Value into a TypeTag                │
//! │  - Parameterized only by the local UTC offset               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Value Model (value.rs, types.rs)                           │
//! │  - Closed set of runtime values and type tags               │
//! │  - The conformance predicate                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Definition time vs instance time
//!
//! A [`RecordType`] is declared through [`RecordType::define`] and frozen into an
//! `Arc` by `build()`. Declarations can fail (duplicate name, abstract type, `BigInteger`),
//! but once built the type is read-only and can be shared across threads. Records hold
//! their own slots and are mutated only through `&mut`.
//!
//! ## Example
//!
//! ```
//! use strongly_typed::{Record, RecordType, TypeTag};
//!
//! let person = RecordType::define("Person")
//!     .attribute("id", TypeTag::Integer)?
//!     .attribute("name", TypeTag::String)?
//!     .build();
//!
//! let leo = Record::from_mapping(&person, [("id", "1122"), ("name", "Leo")])?;
//! assert_eq!(leo.get_as::<i64>("id")?, Some(1122));
//! # Ok::<(), strongly_typed::ModelError>(())
//! ```
//!
//! ## Logging
//!
//! The library logs through the `log` facade: declarations and conversions at `debug`,
//! fast-path writes at `trace`. Installing a logger is the host's job.

pub mod attributes;
pub mod coercible;
pub mod config;
pub mod error;
pub mod model;
pub mod types;
pub mod value;

pub use attributes::{AttributeRegistry, AttributeSpec, Identifier};
pub use coercible::{coerce, Coercer};
pub use config::CoercerConfig;
pub use error::{
    CoercionError, ConfigError, ConstructionError, DeclarationError, ModelError, Result,
};
pub use model::{Accessor, Record, RecordType, RecordTypeBuilder};
pub use types::{TypeRef, TypeTag};
pub use value::{FromValue, Symbol, Value};
