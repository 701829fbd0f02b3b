pub mod selector;
pub mod stylesheet;

pub use selector::CssSelectorParser;
pub use stylesheet::CssStylesheetParser;
