//! paircanvas Core Types
//!
//! This crate provides the foundational types shared by the paircanvas
//! scanner and layout engine. It includes:
//!
//! - **Geometry**: Points, sizes, and rectangles in canvas space ([`geometry`] module)
//! - **Identifiers**: Stable merge keys for diagram nodes ([`identifier::OriginalId`])

pub mod geometry;
pub mod identifier;
