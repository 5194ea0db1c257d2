//! Core types and traits for the Carbonview dashboard framework.
//!
//! This crate provides the foundational types used throughout Carbonview:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`]
//! - Draw primitives and the [`Canvas`] abstraction
//! - The [`Widget`] lifecycle (measure → layout → paint → event)
//! - Elm-style application state: [`State`], [`Command`]

mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
mod state;
mod theme;
pub mod widget;

pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, StrokeStyle};
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use state::{Command, FetchGeneration, FetchRequest, State};
pub use theme::{ChartPalette, ColorPalette, Theme};
pub use widget::{Canvas, FontWeight, LayoutResult, TextStyle, VisualFlag, Widget, WidgetId};
