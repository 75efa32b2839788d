use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// One category card shown in the strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItem {
    pub label: String,
    pub image_ref: String,
    pub alt_text: String,
}

impl DisplayItem {
    pub fn new(
        label: impl Into<String>,
        image_ref: impl Into<String>,
        alt_text: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            image_ref: image_ref.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// Holds the source items and exposes them twice in a row so the strip can
/// wrap without a visible seam.
#[derive(Debug, Clone, Default)]
pub struct ItemSequencer {
    items: Vec<DisplayItem>,
}

impl ItemSequencer {
    pub fn new(items: Vec<DisplayItem>) -> Self {
        Self { items }
    }

    /// Reads a JSON array of items.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let items: Vec<DisplayItem> = serde_json::from_str(&json)?;
        Ok(Self::new(items))
    }

    /// Number of source items (`N`).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Length of the rendered sequence (`2N`).
    pub fn rendered_len(&self) -> usize {
        self.items.len() * 2
    }

    /// Item at a rendered index; index `i + N` aliases index `i`.
    pub fn rendered(&self, index: usize) -> Option<&DisplayItem> {
        if self.items.is_empty() || index >= self.rendered_len() {
            return None;
        }
        self.items.get(index % self.items.len())
    }

    /// Iterates the rendered sequence `items ++ items`.
    pub fn rendered_sequence(&self) -> impl Iterator<Item = &DisplayItem> + '_ {
        self.items.iter().chain(self.items.iter())
    }
}

/// Default solar product categories displayed on the landing page.
pub fn solar_catalog() -> Vec<DisplayItem> {
    [
        ("Residential Solar", "residential", "Rooftop panels on a family home"),
        ("Commercial Solar", "commercial", "Panel array on an office roof"),
        ("Battery Storage", "battery", "Wall-mounted home battery unit"),
        ("EV Charging", "ev-charging", "Electric car at a home charger"),
        ("Solar Carports", "carport", "Parking canopy covered in panels"),
        ("Ground Mount", "ground-mount", "Panels installed in an open field"),
        ("Off-Grid Systems", "off-grid", "Cabin powered by a standalone array"),
        ("Solar Water Heating", "water-heating", "Thermal collectors on a roof"),
        ("Maintenance", "maintenance", "Technician cleaning solar panels"),
        ("Energy Audits", "energy-audit", "Consultant reviewing a power bill"),
    ]
    .into_iter()
    .map(|(label, slug, alt)| {
        DisplayItem::new(label, format!("/images/categories/{slug}.jpg"), alt)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_sequence_is_doubled() {
        let sequencer = ItemSequencer::new(solar_catalog());
        let n = sequencer.len();
        let rendered: Vec<_> = sequencer.rendered_sequence().collect();

        assert_eq!(rendered.len(), 2 * n);
        for i in 0..n {
            assert_eq!(rendered[i], rendered[i + n]);
            assert_eq!(sequencer.rendered(i), sequencer.rendered(i + n));
        }
    }

    #[test]
    fn out_of_range_and_empty_lookups_are_none() {
        let sequencer = ItemSequencer::new(solar_catalog());
        assert!(sequencer.rendered(sequencer.rendered_len()).is_none());

        let empty = ItemSequencer::default();
        assert!(empty.is_empty());
        assert_eq!(empty.rendered_len(), 0);
        assert!(empty.rendered(0).is_none());
        assert_eq!(empty.rendered_sequence().count(), 0);
    }

    #[test]
    fn items_use_camel_case_json() {
        let items: Vec<DisplayItem> = serde_json::from_str(
            r#"[{"label": "Solar", "imageRef": "/a.jpg", "altText": "panels"}]"#,
        )
        .unwrap();
        assert_eq!(items[0], DisplayItem::new("Solar", "/a.jpg", "panels"));
    }
}
