pub mod error;
pub mod event;
pub mod plugin;
pub mod state;

pub use error::{MonitorError, Result};
pub use event::{Message, PropertyChanged};
pub use plugin::WidgetPlugin;
pub use state::{MonitorState, Sample};
