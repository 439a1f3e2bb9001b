pub mod book;
pub mod catalog;
pub mod integrity;
pub mod reader;

pub use book::{Book, BookSummary, Choice, Consequence, Difficulty, Section};
pub use catalog::Catalog;
pub use integrity::Issue;
pub use reader::ContentReader;
