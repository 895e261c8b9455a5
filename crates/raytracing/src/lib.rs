pub mod geometry;
pub mod materials;
pub mod renderer;
pub mod scene;
pub mod settings;
