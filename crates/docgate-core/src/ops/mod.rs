pub mod operation;
pub mod translate;

pub use operation::{Operation, OperationDocument};
pub use translate::translate;
