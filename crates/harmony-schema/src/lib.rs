//! # harmony-schema
//!
//! Schema registry and resolution engine for Harmony:
//! - `SchemaRegistry`: id-keyed store of schema documents, uniqueness enforced
//! - `Validator`: Draft-4 validator extension (`jsonschema`) with reshaped
//!   `required` faults and a meta-schema permitting `$mixin`
//! - `MixinResolver`: cycle-safe, in-place expansion of `$mixin` directives
//! - `Pass` / `SchemaValidatorPass`: the ordered registry pipeline
//!
//! Consumers drive the pipeline through `harmony-session`; this crate holds
//! the algorithmic core and knows nothing about schema discovery.

pub mod pass;
pub mod registry;
pub mod resolver;
pub mod validator;

pub use pass::{Pass, SchemaValidatorPass};
pub use registry::SchemaRegistry;
pub use resolver::MixinResolver;
pub use validator::{ValidationFault, Validator};
