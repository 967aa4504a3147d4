pub mod archive;
pub mod enhance;
pub mod prompt;
