pub mod export;
pub mod form;
pub mod import;
pub mod normalize;
pub mod staging;

pub use crate::domain::model::{ExportFormat, RawForm, RawInput, Record, Value};
pub use crate::domain::ports::{ConfigProvider, Encoder, Storage};
pub use crate::domain::schema::{FieldDefinition, FieldKind, Schema};
pub use crate::utils::error::Result;
