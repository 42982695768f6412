// Application layer - Series building and chart view state
pub mod chart_service;
pub mod field_resolver;
pub mod palette;
pub mod series_builder;
pub mod time_window;
pub mod visibility;
