//! Browser behavior for the AllHalal marketing page: the hero counter, the
//! contact form, the language carousel with its particle backdrop, and the
//! navigation chrome.

mod app_runtime;
mod boot;
pub mod carousel;
pub mod contact_form;
pub mod counter;
mod dom;
mod frame_loop;
pub mod page_chrome;
pub mod particles;
pub mod runtime;
mod site_config;

pub use app_runtime::set_site_config;
pub use runtime::{mounted_labels, unmount_all, PageComponent};

/// Installs the panic hook and mounts the page once the DOM is ready.
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    boot::boot();
}
