pub mod analyzer;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod locations;
pub mod ner;
pub mod report;
pub mod severity;

mod text;


pub use analyzer::*;
pub use batch::*;
pub use classifier::*;
pub use config::*;
pub use locations::*;
pub use ner::*;
pub use report::*;
pub use severity::*;
