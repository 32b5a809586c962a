/// Declaration sorting - segmentation of a run into entries and re-rendering
pub mod entry;
pub mod region;

pub use entry::{statement_end, Entry, FormattingRun};
pub use region::{sort_region, Region};
