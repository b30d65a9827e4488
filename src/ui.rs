//! Drawing for dirview. See [fn@render].

pub mod render;

pub use render::render;
