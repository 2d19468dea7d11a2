pub mod selector;
pub mod session;
pub mod view;

pub use crate::domain::model::{Country, EntityId, Item, Level, Port, Selection};
pub use crate::domain::ports::{
    ConfigProvider, ConfirmPrompt, ConfirmationService, ReferenceDataProvider,
};
pub use crate::utils::error::Result;
