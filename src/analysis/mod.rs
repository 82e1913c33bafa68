pub mod direction;
pub mod quantiles;
pub mod speed;
