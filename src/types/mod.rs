pub mod date_range;
pub mod location;
pub mod series;
pub mod time_window;
pub mod variable;
