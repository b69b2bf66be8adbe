pub mod app;
pub mod ui;
pub mod volume_bar;

/// Milliseconds between animation ticks.
pub const TICK_RATE: u64 = 50;
