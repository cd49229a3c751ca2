//! Fixed field layout: which value goes where on the canvas, at which font
//! size, with which label.

#![allow(missing_docs)]

use crate::telemetry::collector::Readings;

/// Font size class for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontClass {
    /// 20px hostname banner.
    Large,
    /// 13px body rows.
    Small,
}

/// One labeled text field at a fixed canvas position.
///
/// Positions are caller-guaranteed non-overlapping for the fixed set below;
/// nothing validates collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: Option<&'static str>,
    pub value: String,
    pub font_class: FontClass,
    /// Top-left text origin in canvas pixels.
    pub position: (i32, i32),
}

impl Field {
    /// The exact string drawn on the canvas. Labeled fields render as
    /// `"<label> <value>"`, unlabeled fields render the value verbatim —
    /// the only branching logic in rendering.
    #[must_use]
    pub fn formatted(&self) -> String {
        match self.label {
            Some(label) => format!("{label} {}", self.value),
            None => self.value.clone(),
        }
    }
}

/// Assemble the fixed, ordered field set. Order is render order only.
#[must_use]
pub fn build_layout(readings: &Readings) -> Vec<Field> {
    let field = |label, value: &str, font_class, position| Field {
        label,
        value: value.to_string(),
        font_class,
        position,
    };
    vec![
        field(None, &readings.hostname, FontClass::Large, (0, 0)),
        field(None, &readings.ip, FontClass::Small, (0, 40)),
        field(Some("WiFi"), &readings.wifi, FontClass::Small, (120, 40)),
        field(None, &readings.time, FontClass::Small, (0, 60)),
        field(Some("Mem"), &readings.memory, FontClass::Small, (120, 60)),
        field(Some("Disk"), &readings.disk, FontClass::Small, (0, 80)),
        field(None, &readings.temperature, FontClass::Small, (120, 80)),
        field(Some("Up"), &readings.uptime, FontClass::Small, (0, 100)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_readings() -> Readings {
        Readings {
            hostname: "pion".to_string(),
            ip: "192.168.1.17".to_string(),
            wifi: "64/70 -46 dBm".to_string(),
            time: "2026-08-29 10:30".to_string(),
            memory: "24%".to_string(),
            disk: "4G/122G 4%".to_string(),
            temperature: "38.1 C".to_string(),
            uptime: "0.05d, active 0.81%".to_string(),
        }
    }

    #[test]
    fn labeled_fields_prefix_label() {
        let field = Field {
            label: Some("Mem"),
            value: "24%".to_string(),
            font_class: FontClass::Small,
            position: (120, 60),
        };
        assert_eq!(field.formatted(), "Mem 24%");
    }

    #[test]
    fn unlabeled_fields_render_verbatim() {
        let field = Field {
            label: None,
            value: "NO TEMP".to_string(),
            font_class: FontClass::Small,
            position: (120, 80),
        };
        assert_eq!(field.formatted(), "NO TEMP");
    }

    #[test]
    fn layout_has_fixed_order_and_positions() {
        let layout = build_layout(&sample_readings());
        assert_eq!(layout.len(), 8);

        assert_eq!(layout[0].position, (0, 0));
        assert_eq!(layout[0].font_class, FontClass::Large);
        assert_eq!(layout[0].label, None);
        assert_eq!(layout[0].value, "pion");

        let positions: Vec<(i32, i32)> = layout.iter().map(|f| f.position).collect();
        assert_eq!(
            positions,
            vec![
                (0, 0),
                (0, 40),
                (120, 40),
                (0, 60),
                (120, 60),
                (0, 80),
                (120, 80),
                (0, 100),
            ]
        );

        // Only the hostname banner is large.
        assert!(
            layout[1..]
                .iter()
                .all(|f| f.font_class == FontClass::Small)
        );
    }

    #[test]
    fn layout_labels_match_fixed_set() {
        let layout = build_layout(&sample_readings());
        let labels: Vec<Option<&str>> = layout.iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            vec![
                None,
                None,
                Some("WiFi"),
                None,
                Some("Mem"),
                Some("Disk"),
                None,
                Some("Up"),
            ]
        );
    }
}
