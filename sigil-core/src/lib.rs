//! Statement directive resolution
//!
//! This crate turns the `@...` directives written in front of a statement into
//! typed, validated metadata.
//!
//! - `reader` splits statement text into directive literals and body
//! - `registry` / `imports` hold the frozen schema and import configuration
//! - `resolver` / `validator` bind literals against their schemas
//! - `formatter` writes resolved directives back to canonical text
//! - `statement` ties the pipeline together behind [`AnnotationCompiler`]

pub mod ast;
pub mod definition;
pub mod directive;
pub mod error;
pub mod formatter;
pub mod imports;
pub mod reader;
pub mod registry;
pub mod resolver;
pub mod statement;
pub mod types;
pub mod validator;

pub use definition::builtin;
pub use definition::enumeration::EnumDefinition;
pub use definition::schema::DirectiveSchema;
pub use definition::{AttributeDefinition, AttributeKind, ScalarKind};
pub use directive::{DirectiveSet, ResolvedDirective};
pub use error::{AnnotationError, DefinitionError, SigilError, SigilResult, SyntaxError};
pub use formatter::{DirectiveFormatter, FormatOptions};
pub use imports::{ImportEntry, ImportTable};
pub use registry::{RegistryBuilder, SchemaRegistry};
pub use resolver::{ClassResolver, ResolveScope};
pub use statement::{AnnotationCompiler, CompiledStatement, DirectiveCheck};
pub use types::{AttributeValue, EnumConstant, Position};
