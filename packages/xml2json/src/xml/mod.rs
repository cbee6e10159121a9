//! XML decoding: token reader, subtree decoder and record scanner.

mod decoder;
mod reader;
mod scanner;
mod utils;

pub use decoder::TreeDecoder;
pub use reader::{Token, TokenReader};
pub use scanner::DocumentScanner;
pub use utils::{is_namespace_declaration, resolve_entity, TextRuns};
