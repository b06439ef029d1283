mod links;
mod logging;
mod variables;

pub use links::{run_url, trim_base_url};
pub use logging::{level_from_str, setup_logging};
pub use variables::{looks_structured, normalize, resolve_hcl};
