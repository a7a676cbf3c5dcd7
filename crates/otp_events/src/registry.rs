//! Process-wide mount registry.
//!
//! Every mounted component registers here. The registry hands out
//! [`MountId`]s and owns the document-level style element: it is installed by
//! the first mount and removed when the last one unmounts.

use crate::host::DocumentHost;
use crate::style::{STYLE_ELEMENT_ID, document_style_rules};
use otp_core::MountId;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

pub type SharedRegistry = Rc<RefCell<MountRegistry>>;

#[derive(Debug, Default)]
pub struct MountRegistry {
    next_id: u64,
    mounts: BTreeSet<MountId>,
    style_installed: bool,
}

thread_local! {
    static GLOBAL: SharedRegistry = Rc::new(RefCell::new(MountRegistry::default()));
}

/// The registry shared by every mount on this thread.
pub fn global_registry() -> SharedRegistry {
    GLOBAL.with(Rc::clone)
}

impl MountRegistry {
    pub fn new_shared() -> SharedRegistry {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Register a mount and make sure the document styles exist.
    pub fn register(&mut self, document: &mut dyn DocumentHost) -> MountId {
        let id = MountId::from_raw(self.next_id);
        self.next_id += 1;
        self.mounts.insert(id);
        if !self.style_installed {
            self.style_installed = install_document_styles(document);
        }
        log::debug!(target: "otp.registry", "mounted {id} ({} live)", self.mounts.len());
        id
    }

    /// Drop a mount. The style element goes away with the last one.
    pub fn unregister(&mut self, id: MountId, document: &mut dyn DocumentHost) {
        if !self.mounts.remove(&id) {
            log::debug!(target: "otp.registry", "unmount of unknown {id}");
            return;
        }
        if self.mounts.is_empty() && self.style_installed {
            document.remove_style_element(STYLE_ELEMENT_ID);
            self.style_installed = false;
        }
        log::debug!(target: "otp.registry", "unmounted {id} ({} live)", self.mounts.len());
    }

    pub fn live_mounts(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_mounted(&self, id: MountId) -> bool {
        self.mounts.contains(&id)
    }

    pub fn style_installed(&self) -> bool {
        self.style_installed
    }
}

/// Create the style element and insert each rule on its own, so one rejected
/// rule (a strict CSP, an engine without `:autofill`) does not drop the rest.
///
/// Returns whether the element exists afterwards.
fn install_document_styles(document: &mut dyn DocumentHost) -> bool {
    match document.ensure_style_element(STYLE_ELEMENT_ID) {
        Ok(false) => true,
        Ok(true) => {
            for rule in document_style_rules() {
                if let Err(err) = document.insert_style_rule(STYLE_ELEMENT_ID, &rule) {
                    log::error!(target: "otp.style", "could not insert CSS rule: {err}");
                }
            }
            true
        }
        Err(err) => {
            log::error!(target: "otp.style", "could not create style element: {err}");
            false
        }
    }
}
