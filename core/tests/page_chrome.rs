use allhalal_web_core::chrome::{
    anchor_scroll_top, in_page_anchor, nav_style_for_scroll, NAV_AT_TOP, NAV_SCROLLED,
};
use allhalal_web_core::MenuState;

#[test]
fn nav_switches_strictly_past_threshold() {
    assert_eq!(nav_style_for_scroll(0.0), NAV_AT_TOP);
    assert_eq!(nav_style_for_scroll(100.0), NAV_AT_TOP);
    assert_eq!(nav_style_for_scroll(100.5), NAV_SCROLLED);
    assert_eq!(nav_style_for_scroll(4000.0), NAV_SCROLLED);
}

#[test]
fn bare_hash_is_not_intercepted() {
    assert_eq!(in_page_anchor("#"), None);
    assert_eq!(in_page_anchor("/about#team"), None);
    assert_eq!(in_page_anchor("#features"), Some("#features"));
}

#[test]
fn anchor_offset_leaves_room_for_header() {
    assert_eq!(anchor_scroll_top(250.0, 1000.0), 1150.0);
    assert_eq!(anchor_scroll_top(40.0, 0.0), -60.0);
}

#[test]
fn menu_toggle_and_close() {
    let mut menu = MenuState::default();
    assert!(!menu.is_open());
    assert!(menu.toggle());
    assert!(!menu.toggle());
    menu.toggle();
    menu.close();
    assert!(!menu.is_open());
}
