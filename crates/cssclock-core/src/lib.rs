pub mod adapters;
pub mod config;
pub mod event_bus;
pub mod module_context;
pub mod modules;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use module_context::{ModuleContext, ModuleEventSender};
