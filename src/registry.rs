//! Process-wide default suffix list.
//!
//! The first call to [`default_list`] parses the bundled list. Every caller
//! gets an `Arc` snapshot: [`set_default`], [`clear_default`] and
//! [`reload_default`] install a new list and never touch one that is already
//! handed out, so in-flight lookups keep working against the list they started
//! with.

use std::sync::Arc;

use log::info;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::list::SuffixList;

#[cfg(feature = "bundled")]
const BUNDLED_DEFINITION: &str = include_str!("../data/public_suffix_list.dat");

#[cfg(not(feature = "bundled"))]
const BUNDLED_DEFINITION: &str = "";

static DEFAULT_LIST: Lazy<RwLock<Option<Arc<SuffixList>>>> = Lazy::new(|| RwLock::new(None));

/// Text of the bundled suffix list (empty without the `bundled` feature).
pub fn default_definition() -> &'static str {
    BUNDLED_DEFINITION
}

/// Get the default list, parsing the bundled definition on first use.
pub fn default_list() -> Arc<SuffixList> {
    if let Some(list) = DEFAULT_LIST.read().as_ref() {
        return Arc::clone(list);
    }

    let mut slot = DEFAULT_LIST.write();
    // Another thread may have won the race for the write lock
    if let Some(list) = slot.as_ref() {
        return Arc::clone(list);
    }
    let list = Arc::new(bundled_list());
    info!("loaded default suffix list: {} rules", list.len());
    *slot = Some(Arc::clone(&list));
    list
}

/// Replace the default list.
pub fn set_default(list: SuffixList) -> Arc<SuffixList> {
    let list = Arc::new(list);
    info!("installed default suffix list: {} rules", list.len());
    *DEFAULT_LIST.write() = Some(Arc::clone(&list));
    list
}

/// Drop the default list; the next [`default_list`] call parses it again.
pub fn clear_default() {
    info!("cleared default suffix list");
    *DEFAULT_LIST.write() = None;
}

/// Re-parse the bundled definition and install it as the default list.
pub fn reload_default() -> Arc<SuffixList> {
    let list = Arc::new(bundled_list());
    info!("reloaded default suffix list: {} rules", list.len());
    *DEFAULT_LIST.write() = Some(Arc::clone(&list));
    list
}

/// Check whether the default list has been built.
pub fn is_default_loaded() -> bool {
    DEFAULT_LIST.read().is_some()
}

fn bundled_list() -> SuffixList {
    SuffixList::parse(BUNDLED_DEFINITION).expect("bundled public suffix list is malformed")
}
