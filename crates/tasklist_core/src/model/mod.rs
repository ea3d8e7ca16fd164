mod task;

pub use task::{Counts, Filter, Task};
