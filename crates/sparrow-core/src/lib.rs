#![deny(warnings)]
pub mod game;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "sparrowtally"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
