pub mod config;
pub mod errors;
pub mod locator;
pub mod logging;
pub mod token;
pub mod util;

pub use errors::LocateError;
pub use locator::{
    CommandLocator, CommandMap, DeclarationKind, DeclarationRecord, ScanOptions,
    find_orchestration, has_orchestration, locate, require_orchestration,
};
