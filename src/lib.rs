//! panekit
//!
//! Multi-pane terminal status screen: independently scrollable list panes
//! around a detail view that follows the selection.
//!
//! Pure core: `model`, `view_state` (markup, folding, height index) and
//! `state` (panes, navigation, mouse). Impure shell: `view` (layout, drawing,
//! the session loop), `source`, `config` and `logging`.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
