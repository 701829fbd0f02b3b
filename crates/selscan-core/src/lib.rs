pub mod classify;
pub mod config;
pub mod decompose;
pub mod diagnostics;
pub mod filter;
pub mod order;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod walker;

pub use classify::Bucket;
pub use config::Config;
pub use diagnostics::{Diagnostics, Warning};
pub use parser::{ParseError, SelectorParser, StylesheetParser};
pub use pipeline::{ExtractionPipeline, Options};
pub use report::{Inventory, Report, SimpleBuckets};
pub use types::*;
