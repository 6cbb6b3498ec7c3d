pub mod error;
pub mod hooks;
pub mod model;
pub mod reminder;
pub mod repository;
pub mod scheduler;
pub mod service;
pub mod time;

pub use error::StoreError;
pub use hooks::{Celebrate, ConfirmPrompt, Notifier, TickSink, TickView};
pub use model::task::Task;
pub use reminder::{spawn_reminder, REMINDER_PERIOD};
pub use repository::{FileSlot, MemorySlot, StorageSlot};
pub use scheduler::{Countdown, Phase, Scheduler, Tick};
pub use service::dto::TaskRow;
pub use service::store::TaskStore;
pub use time::{format_hms, parse_due_minutes, Clock, SystemClock};
