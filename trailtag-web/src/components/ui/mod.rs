pub mod badge_grid;
pub mod controls;
pub mod progress_bar;
pub mod stop_map;
pub mod stop_panel;
