mod activity;
mod directory;

pub use activity::*;
pub use directory::*;
