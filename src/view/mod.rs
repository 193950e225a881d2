pub mod chart_events;
pub mod palette;
pub mod zoom;
