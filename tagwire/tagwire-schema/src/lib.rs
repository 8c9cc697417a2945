//! `.tws` schema text for `tagwire`.
//!
//! A small line-oriented language that produces the
//! [`TypeDescriptor`](tagwire_core::TypeDescriptor)s the plan compiler
//! consumes:
//!
//! ```text
//! // Shapes with a polymorphic base.
//! abstract message BaseShape {
//!   10: string label;
//!   include 101 RectShape;
//!   include 102 CircleShape;
//! }
//! message CircleShape {
//!   1: Vec2 center;
//!   2: f32 radius;
//! }
//! struct Vec2 {
//!   1: f32 x;
//!   2: f32 y;
//! }
//! message Bag {
//!   1: list<i32> values [zigzag];
//!   2: set<string> labels;
//!   3: u64[] ids [fixed, get=ids_getter];
//!   skip 4: bytes cache;
//! }
//! ```

mod error;
mod lex;
mod parser;

pub use error::SchemaParseError;
pub use parser::parse_schema;
