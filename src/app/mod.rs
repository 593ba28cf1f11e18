pub mod app;
pub mod prerender;
