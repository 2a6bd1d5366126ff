use std::cell::RefCell;

use allhalal_web_core::SiteConfig;

use crate::site_config;

thread_local! {
    static SITE_CONFIG: RefCell<Option<SiteConfig>> = RefCell::new(None);
}

/// Overrides the config read from the page URL. Must run before boot.
pub fn set_site_config(config: SiteConfig) {
    SITE_CONFIG.with(|slot| {
        *slot.borrow_mut() = Some(config);
    });
}

pub(crate) fn site_config() -> SiteConfig {
    SITE_CONFIG.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(site_config::load_site_config)
            .clone()
    })
}
