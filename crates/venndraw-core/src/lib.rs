//! Venndraw Core Types and Definitions
//!
//! This crate provides the foundational types used to draw Venn diagrams:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and circles ([`geometry`] module)
//! - **Draw**: Drawable text and region shapes rendered to layered SVG ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
