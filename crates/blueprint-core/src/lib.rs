//! Blueprint Core Types and Definitions
//!
//! This crate provides the foundational types for Blueprint, a tool that turns
//! a plain-text C4 architecture description into layered diagrams. It includes:
//!
//! - **Model**: The name-keyed entity store ([`model::Model`])
//! - **Diagnostics**: Collected, non-fatal definition errors ([`diagnostic`] module)
//! - **Colors**: CSS color handling and the node palette ([`color`] module)
//! - **Text**: Label word wrapping ([`text::wrap_words`])

pub mod color;
pub mod diagnostic;
pub mod model;
pub mod text;
