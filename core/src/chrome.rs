pub const HEADER_OFFSET_PX: f64 = 100.0;
pub const NAV_SCROLL_THRESHOLD_PX: f64 = 100.0;

pub const REVEAL_SELECTOR: &str = ".feature-block, .step-card, .trust-item";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_HIDDEN: RevealStyle = RevealStyle {
    opacity: "0",
    transform: "translateY(30px)",
};
pub const REVEAL_SHOWN: RevealStyle = RevealStyle {
    opacity: "1",
    transform: "translateY(0)",
};
pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

pub const NAV_AT_TOP: NavStyle = NavStyle {
    background: "rgba(255, 255, 255, 0.95)",
    box_shadow: "0 10px 15px -3px rgba(0, 0, 0, 0.1)",
};

pub const NAV_SCROLLED: NavStyle = NavStyle {
    background: "rgba(255, 255, 255, 0.98)",
    box_shadow: "0 20px 25px -5px rgba(0, 0, 0, 0.1)",
};

pub fn nav_style_for_scroll(page_y: f64) -> NavStyle {
    if page_y > NAV_SCROLL_THRESHOLD_PX {
        NAV_SCROLLED
    } else {
        NAV_AT_TOP
    }
}

/// In-page hash links worth intercepting; a bare `#` is left alone.
pub fn in_page_anchor(href: &str) -> Option<&str> {
    if href.starts_with('#') && href != "#" && href.len() > 1 {
        Some(href)
    } else {
        None
    }
}

/// Document offset to scroll to so the target clears the floating header.
pub fn anchor_scroll_top(target_client_top: f64, page_y: f64) -> f64 {
    target_client_top + page_y - HEADER_OFFSET_PX
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Styled lines printed to the console once the page boots.
pub const CONSOLE_BANNER: [(&str, &str); 3] = [
    ("%c✨ AllHalal", "font-size: 20px; font-weight: bold; color: #C9A05F;"),
    (
        "%cMaking halal choices effortless for modern Muslims.",
        "font-size: 14px; color: #6B7280;",
    ),
    ("%c🕌 حلال", "font-size: 24px; color: #047857;"),
];
