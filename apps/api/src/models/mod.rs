pub mod progress;
pub mod transport;

pub use progress::{StreamProgress, StreamStatus};
pub use transport::{TimedEvent, TransportEvent};
