//! Terminal playground shell: chord commands, the controller wiring
//! search/catalog/memory/perf together, and the ratatui panels.

pub mod app;
pub mod command;
pub mod controller;
pub mod surface;
pub mod ui;

pub use app::App;
pub use command::Command;
pub use command::PanelId;
pub use controller::Notice;
pub use controller::PlaygroundController;
pub use surface::Clipboard;
pub use surface::FakeClipboard;
pub use surface::RecordingSurface;
pub use surface::RenderSurface;
pub use surface::SystemClipboard;
