pub mod html;
pub mod sections;
pub mod text;

#[cfg(test)]
mod tests;

pub use html::render;
pub use sections::{Outline, Section, segment};
