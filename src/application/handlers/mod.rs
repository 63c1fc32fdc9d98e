//! Command handlers.

pub mod screening;

pub use screening::{
    ScreenResponsesCommand, ScreenResponsesError, ScreenResponsesHandler, ScreenResponsesResult,
};
