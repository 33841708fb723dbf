pub mod reconciler;
pub mod store;

pub use reconciler::Reconciler;
pub use sparkpost_publisher_prelude as prelude;
pub use store::{NotFound, TemplateStore, UpdateOptions};
