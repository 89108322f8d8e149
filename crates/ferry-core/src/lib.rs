//! Ferry Core Types and Definitions
//!
//! This crate provides the source side of a Ferry export together with the
//! small vocabulary shared with the target side. It includes:
//!
//! - **Identifiers**: String-interned native identifiers ([`identifier::Id`])
//! - **Model**: The sequence-diagram object model read during an export ([`model`] module)
//! - **Kinds**: The closed set of element kinds and their addressability ([`kind::ElementKind`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Style**: Connector style intents ([`style`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod kind;
pub mod model;
pub mod style;
