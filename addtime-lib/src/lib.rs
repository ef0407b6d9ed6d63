pub mod calc;
pub mod config;
pub mod evaluator;
pub mod formatter;
pub mod parser;
pub mod quantum;
pub mod sheet;
pub mod tokenizer;
pub mod unit;

// Re-export commonly used types
pub use calc::{calc, evaluate, CalcOutput, ERROR_SENTINEL};
pub use parser::{parse, Parsed, ParseError};
pub use quantum::{Qps, TimeValue};
pub use sheet::{add_time, div_time, sub_time, SheetError};
pub use tokenizer::tokenize;
