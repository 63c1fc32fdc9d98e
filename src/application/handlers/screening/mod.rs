//! Screening command handlers.

mod screen_responses;

pub use screen_responses::{
    ScreenResponsesCommand, ScreenResponsesError, ScreenResponsesHandler, ScreenResponsesResult,
};
