//! View state: map filters, navigation, the session intro flag and the
//! interaction interface the renderer plugs into

pub mod dashboard;
pub mod filter;
pub mod interaction;
pub mod map;
pub mod navigation;
pub mod session;

pub use dashboard::{Dashboard, Panel, TeamDetail};
pub use filter::{FilterGroup, MapFilter, Visibility};
pub use interaction::{ClickHandler, FilterHandler, HoverHandler, InteractionSurface};
pub use map::MapView;
pub use navigation::{TeamDetailHeader, TeamLink, TeamQuery};
pub use session::{IntroState, MemoryStore, SessionStore};
