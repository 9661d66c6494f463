pub mod compactness;
pub mod facade;
pub mod orientation;
pub mod room;
pub mod units;
