pub mod builder;
pub mod icon;
pub mod organizer;
pub mod toolchain;

pub use pp_core::{BuildConfig, BuildFlags, BuildOutcome, PackError, PackagerTool};
