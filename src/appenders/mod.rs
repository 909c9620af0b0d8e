//! Appender implementations

pub mod file;
pub mod stream;

pub use file::FileAppender;
pub use stream::{ConsoleAppender, StreamAppender};

pub use crate::core::Appender;
