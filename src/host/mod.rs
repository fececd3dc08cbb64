pub mod app;
pub mod registry;

pub use app::{discover_tools, AppContext};
pub use registry::{Host, HostBuilder};
