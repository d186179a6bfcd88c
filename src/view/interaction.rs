//! Interaction capability exposed by the rendering layer
//!
//! The renderer owns the DOM and the event loop. It offers three
//! registration points; the core hands it handlers that answer each event
//! with data and leaves the drawing to the renderer.

use crate::models::TeamCard;
use crate::view::filter::{MapFilter, Visibility};
use crate::view::navigation::TeamLink;

/// Pointer entered a marker: abbreviation in, hover card out
pub type HoverHandler = Box<dyn Fn(&str) -> Option<TeamCard> + Send + Sync>;

/// Marker clicked: abbreviation in, navigation link out
pub type ClickHandler = Box<dyn Fn(&str) -> Option<TeamLink> + Send + Sync>;

/// Filter changed: new filter in, marker visibility out
pub type FilterHandler = Box<dyn Fn(&MapFilter) -> Vec<Visibility> + Send + Sync>;

pub trait InteractionSurface {
    fn on_hover(&mut self, handler: HoverHandler);
    fn on_click(&mut self, handler: ClickHandler);
    fn on_filter_change(&mut self, handler: FilterHandler);
}
