pub mod tier;
pub mod release;
pub mod award;
pub mod snapshot;
pub mod save;
pub mod error;

pub use tier::*;
pub use release::*;
pub use award::*;
pub use snapshot::*;
pub use save::*;
pub use error::*;
