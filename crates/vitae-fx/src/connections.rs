#![forbid(unsafe_code)]

//! Constellation lines between nearby shapes.

use crate::shape::Shape;

/// Link geometry parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkParams {
    /// Centres closer than this (pixels) are linked.
    pub link_distance: f64,
    /// Opacity of a link between coincident centres.
    pub max_opacity: f64,
    /// Line width in pixels.
    pub line_width: f64,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            link_distance: 150.0,
            max_opacity: 0.35,
            line_width: 1.0,
        }
    }
}

/// A line between shapes `a < b` (indices into the shape slice).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f64,
}

/// Collect links into `out` (cleared first). Pairs are emitted in `(a, b)`
/// lexicographic order.
pub fn build_links(shapes: &[Shape], params: &LinkParams, out: &mut Vec<Link>) {
    out.clear();
    if params.link_distance <= 0.0 {
        return;
    }
    for (a, sa) in shapes.iter().enumerate() {
        for (offset, sb) in shapes[a + 1..].iter().enumerate() {
            let d = sa.position.distance(sb.position);
            if d < params.link_distance {
                let opacity = params.max_opacity * (1.0 - d / params.link_distance);
                out.push(Link {
                    a,
                    b: a + 1 + offset,
                    opacity,
                });
            }
        }
    }
}

/// Link set refreshed every `stride` ticks.
#[derive(Debug, Clone)]
pub struct LinkCache {
    params: LinkParams,
    stride: u32,
    links: Vec<Link>,
    last_rebuild: Option<u64>,
}

impl LinkCache {
    /// `stride` of 0 is treated as 1.
    pub fn new(params: LinkParams, stride: u32) -> Self {
        Self {
            params,
            stride: stride.max(1),
            links: Vec::new(),
            last_rebuild: None,
        }
    }

    pub fn set_stride(&mut self, stride: u32) {
        self.stride = stride.max(1);
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    pub fn params(&self) -> &LinkParams {
        &self.params
    }

    /// Rebuild if `tick` is at least `stride` past the last rebuild.
    /// Returns whether a rebuild happened.
    pub fn refresh(&mut self, tick: u64, shapes: &[Shape]) -> bool {
        let due = match self.last_rebuild {
            None => true,
            Some(last) => tick < last || tick - last >= u64::from(self.stride),
        };
        if due {
            build_links(shapes, &self.params, &mut self.links);
            self.last_rebuild = Some(tick);
        }
        due
    }

    /// Drop cached links; the next refresh always rebuilds.
    pub fn invalidate(&mut self) {
        self.links.clear();
        self.last_rebuild = None;
    }

    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{OutlineStyle, Palette};
    use crate::shape::ShapeKind;
    use vitae_core::geometry::Point;

    fn at(x: f64, y: f64) -> Shape {
        let p = Point::new(x, y);
        Shape {
            home: p,
            position: p,
            kind: ShapeKind::Disc,
            size: 20.0,
            outline: OutlineStyle {
                color: Palette::CV.white,
                weight: 2,
            },
            noise_offset_x: 0.0,
            noise_offset_y: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            breath_phase: 0.0,
            breath_amplitude: 0.1,
            scale: 1.0,
        }
    }

    #[test]
    fn links_only_close_pairs_with_linear_falloff() {
        let shapes = [at(0.0, 0.0), at(75.0, 0.0), at(400.0, 0.0)];
        let mut links = Vec::new();
        build_links(&shapes, &LinkParams::default(), &mut links);
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].opacity - 0.175).abs() < 1e-12);
    }

    #[test]
    fn link_distance_is_exclusive() {
        let shapes = [at(0.0, 0.0), at(150.0, 0.0)];
        let mut links = Vec::new();
        build_links(&shapes, &LinkParams::default(), &mut links);
        assert!(links.is_empty());
    }

    #[test]
    fn pair_order_is_lexicographic() {
        let shapes = [at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0)];
        let mut links = Vec::new();
        build_links(&shapes, &LinkParams::default(), &mut links);
        let pairs: Vec<_> = links.iter().map(|l| (l.a, l.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn cache_rebuilds_on_stride() {
        let mut shapes = vec![at(0.0, 0.0), at(10.0, 0.0)];
        let mut cache = LinkCache::new(LinkParams::default(), 2);
        assert!(cache.refresh(0, &shapes));
        assert_eq!(cache.links().len(), 1);

        shapes[1].position = Point::new(1000.0, 0.0);
        assert!(!cache.refresh(1, &shapes));
        assert_eq!(cache.links().len(), 1);
        assert!(cache.refresh(2, &shapes));
        assert!(cache.links().is_empty());
    }

    #[test]
    fn cache_rebuilds_after_counter_restart() {
        let shapes = vec![at(0.0, 0.0), at(10.0, 0.0)];
        let mut cache = LinkCache::new(LinkParams::default(), 4);
        cache.refresh(10, &shapes);
        assert!(cache.refresh(0, &shapes));
        cache.invalidate();
        assert!(cache.links().is_empty());
        assert!(cache.refresh(1, &shapes));
    }

    #[test]
    fn zero_stride_means_every_tick() {
        let cache = LinkCache::new(LinkParams::default(), 0);
        assert_eq!(cache.stride(), 1);
    }
}
