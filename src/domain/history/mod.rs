mod sent_lines;

pub use sent_lines::{SentHistory, DEFAULT_HISTORY_SIZE};
