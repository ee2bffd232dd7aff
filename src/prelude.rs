pub use anyhow::Context;
pub use tracing::{debug, info, instrument, warn};

pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
