pub mod analyze;
pub mod derive;
pub mod parse;
pub mod rasterize;
pub mod render;
pub mod series;
pub mod zones;
