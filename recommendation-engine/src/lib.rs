pub mod broadcast;
pub mod matcher;
pub mod message;
pub mod similarity;
pub mod tfidf;

#[cfg(test)]
mod tests;

pub use matcher::*;
pub use message::*;
pub use tfidf::*;
