pub mod config;
pub mod error;

// Property maintenance domain
pub mod event;
pub mod record;
pub mod status;
pub mod sync;
pub mod system;

pub use config::*;
pub use error::*;

pub use event::*;
pub use record::*;
pub use status::*;
pub use sync::*;
pub use system::*;
