//! Presentational components shared by the dashboard views.

mod header;
pub use header::DashboardHeader;

mod icon;
pub use icon::{SignOutIcon, TileIcon};

mod tile;
pub use tile::{AdminBadge, TileCard, TileGrid};
