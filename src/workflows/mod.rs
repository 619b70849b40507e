pub mod matcher;
pub mod renamer;
