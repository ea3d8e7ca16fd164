pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod task_list;
pub mod view;

pub use controller::{Controller, Event, Outcome};
pub use error::AppError;
pub use model::{Counts, Filter, Task};
pub use store::Store;
pub use task_list::TaskList;
pub use view::{Row, View};
