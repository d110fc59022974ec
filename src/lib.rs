pub mod app_router;
mod clipboard;
mod gallery_runtime;
mod image_probe;
mod js_util;
mod listing_fetch;
pub mod yew_app;

pub use app_router::{load_init_config, InitConfig};
pub use yew_app::{mount, run, App, AppProps};
