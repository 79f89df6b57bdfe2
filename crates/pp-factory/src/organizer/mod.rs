pub mod core;
pub mod shortcut;
pub mod types;
pub mod utils;

pub use self::core::*;
pub use shortcut::*;
pub use types::*;
pub use utils::*;
