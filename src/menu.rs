//! Context menu state. At most one menu is open; opening one closes the others.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::geo::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextMenuKind {
    Map,
    Unit,
    Airbase,
}

/// An open context menu: where it is drawn and which coordinate it acts on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenMenu {
    pub kind: ContextMenuKind,
    /// Device (container) position of the menu.
    pub screen: Point,
    /// Map coordinate under the cursor when the menu opened.
    pub coord: LatLng,
    /// Airbase the menu targets, for airbase menus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airbase: Option<String>,
}

#[derive(Debug, Default)]
pub struct ContextMenus {
    open: Option<OpenMenu>,
}

impl ContextMenus {
    /// Open `menu`, replacing whatever was open.
    pub fn show(&mut self, menu: OpenMenu) {
        self.open = Some(menu);
    }

    /// Close every menu. Returns the menu that was open, if any.
    pub fn hide_all(&mut self) -> Option<OpenMenu> {
        self.open.take()
    }

    /// Close the menu only if it is of `kind`.
    pub fn hide(&mut self, kind: ContextMenuKind) -> Option<OpenMenu> {
        if self.open.as_ref().is_some_and(|m| m.kind == kind) {
            self.open.take()
        } else {
            None
        }
    }

    #[must_use]
    pub fn open(&self) -> Option<&OpenMenu> {
        self.open.as_ref()
    }
}
