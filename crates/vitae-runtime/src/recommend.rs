#![forbid(unsafe_code)]

//! Static quality recommendations by device class.
//!
//! | condition | shapes | blur | stride |
//! |-----------|--------|------|--------|
//! | mobile | 30 | off | 2 |
//! | low-end, not mobile | 50 | off | 1 |
//! | otherwise | 80 | on | 1 |
//!
//! Connections are always enabled and debug guides always disabled.

use vitae_core::device::{BatteryStatus, DeviceCapabilities};

/// Suggested render settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    pub shape_count: usize,
    pub enable_blur: bool,
    pub enable_connections: bool,
    /// Rebuild connections every `update_stride` ticks.
    pub update_stride: u32,
    pub enable_guides: bool,
}

/// Recommendation for a device class.
pub fn recommend(device: &DeviceCapabilities) -> Recommendation {
    let (shape_count, update_stride) = if device.is_mobile {
        (30, 2)
    } else if device.is_low_end {
        (50, 1)
    } else {
        (80, 1)
    };
    Recommendation {
        shape_count,
        enable_blur: !device.is_mobile && !device.is_low_end,
        enable_connections: true,
        update_stride,
        enable_guides: false,
    }
}

/// Like [`recommend`], but a draining battery selects the mobile row.
pub fn recommend_with_battery(
    device: &DeviceCapabilities,
    battery: Option<BatteryStatus>,
) -> Recommendation {
    let saver = battery.is_some_and(|b| b.should_reduce_performance());
    if saver {
        tracing::debug!(
            target: "vitae::perf",
            "battery saver active, using mobile recommendation"
        );
        let mobile = DeviceCapabilities {
            is_mobile: true,
            ..*device
        };
        recommend(&mobile)
    } else {
        recommend(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(is_mobile: bool, is_low_end: bool) -> DeviceCapabilities {
        DeviceCapabilities {
            is_mobile,
            is_low_end,
            prefers_reduced_motion: false,
        }
    }

    #[test]
    fn table() {
        let rows = [
            (caps(true, false), 30, false, 2),
            (caps(true, true), 30, false, 2),
            (caps(false, true), 50, false, 1),
            (caps(false, false), 80, true, 1),
        ];
        for (device, shapes, blur, stride) in rows {
            let r = recommend(&device);
            assert_eq!(r.shape_count, shapes, "{device:?}");
            assert_eq!(r.enable_blur, blur, "{device:?}");
            assert_eq!(r.update_stride, stride, "{device:?}");
            assert!(r.enable_connections);
            assert!(!r.enable_guides);
        }
    }

    #[test]
    fn draining_battery_selects_mobile_row() {
        let desktop = caps(false, false);
        let low = BatteryStatus::new(0.1, false);
        assert_eq!(
            recommend_with_battery(&desktop, Some(low)),
            recommend(&caps(true, false))
        );
    }

    #[test]
    fn charging_or_absent_battery_is_ignored() {
        let desktop = caps(false, false);
        assert_eq!(
            recommend_with_battery(&desktop, Some(BatteryStatus::new(0.1, true))),
            recommend(&desktop)
        );
        assert_eq!(recommend_with_battery(&desktop, None), recommend(&desktop));
    }
}
