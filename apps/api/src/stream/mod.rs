// Stream handling: one reporter per logical stream drives the extractors through the
// active schema adapter and throttles what reaches the UI.
// Extraction runs synchronously on the caller; there are no background tasks here.

pub mod accumulator;
pub mod clock;
pub mod handlers;
pub mod replay;
pub mod reporter;
pub mod throttle;

pub use reporter::ProgressReporter;
