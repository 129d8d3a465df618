//! Display model for the sidebar: the confirmed-areas list and the draw
//! controls.

use aoikit_core::{Aoi, AoiId, AoiKind, StoreSnapshot};
use chrono::Local;

/// Shown instead of the list while it is empty.
pub const EMPTY_LIST_HINT: &str =
    "Start by searching or uploading a shape file to define your first Area of Interest.";

/// One row of the confirmed-areas list.
#[derive(Debug, Clone, PartialEq)]
pub struct AoiListItem {
    pub id: AoiId,
    /// `AOI #n`, 1-based in list order.
    pub label: String,
    pub name: Option<String>,
    pub kind: AoiKind,
    /// Local creation time, `HH:MM:SS`.
    pub added_at: String,
}

impl AoiListItem {
    pub fn new(index: usize, aoi: &Aoi) -> Self {
        Self {
            id: aoi.id(),
            label: format!("AOI #{}", index + 1),
            name: aoi.name().map(str::to_string),
            kind: aoi.kind(),
            added_at: aoi
                .created_at()
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarModel {
    pub search_text: String,
    /// `Confirmed Areas (n)`
    pub heading: String,
    pub items: Vec<AoiListItem>,
    pub empty_hint: Option<&'static str>,
    pub draw_button_label: &'static str,
    /// `Drawing: ON` / `Drawing: OFF`
    pub drawing_status: String,
}

impl SidebarModel {
    pub fn new(snapshot: &StoreSnapshot, drawing: bool) -> Self {
        let items: Vec<AoiListItem> = snapshot
            .aois
            .iter()
            .enumerate()
            .map(|(i, aoi)| AoiListItem::new(i, aoi))
            .collect();

        Self {
            search_text: snapshot.search_location.clone(),
            heading: format!("Confirmed Areas ({})", items.len()),
            empty_hint: items.is_empty().then_some(EMPTY_LIST_HINT),
            items,
            draw_button_label: if drawing { "Finish Drawing" } else { "Draw Area" },
            drawing_status: format!("Drawing: {}", if drawing { "ON" } else { "OFF" }),
        }
    }
}
