pub mod classifier;
pub mod confirm;
pub mod mover;
pub mod preview;
pub mod unpack;

pub use classifier::CategoryTable;
pub use confirm::{AutoAccept, Confirmation, Decision, DialoguerPrompt, Outcome, Prompt};
pub use mover::FileMover;
pub use preview::{FileOperation, OperationKind, PreviewTree};
pub use unpack::plan_unpack;
