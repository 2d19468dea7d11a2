pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{http::HttpReferenceProvider, terminal::Console};
pub use core::{
    selector::{CascadingSelector, FetchTicket},
    session::{FormSession, ResetOutcome},
    view::FormView,
};
pub use utils::currency::{AmountFormatter, RupiahFormatter};
pub use utils::error::{PickerError, Result};
