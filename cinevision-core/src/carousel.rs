//! Circular focus arithmetic and the visible-window projection.
//!
//! Everything here is pure: the navigator functions map one focus index to
//! the next, and [`project`] derives per-card transform parameters from
//! `(list length, focus, viewport class)` alone. Callers re-run the
//! projection after any focus or list change instead of caching it.

/// Viewport width class selecting span, gap, and tilt constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    /// Below 768 px.
    Narrow,
    /// 768 px up to 1024 px.
    Medium,
    /// 1024 px and wider.
    Wide,
}

impl ViewportClass {
    pub fn from_width(width: f32) -> Self {
        if width < 768.0 {
            ViewportClass::Narrow
        } else if width < 1024.0 {
            ViewportClass::Medium
        } else {
            ViewportClass::Wide
        }
    }

    /// Maximum |signed offset| included in the projected window.
    pub const fn span(self) -> i64 {
        match self {
            ViewportClass::Narrow => 3,
            ViewportClass::Medium => 5,
            ViewportClass::Wide => 7,
        }
    }

    /// Horizontal displacement per offset step, in px.
    pub const fn gap(self) -> f32 {
        match self {
            ViewportClass::Narrow => 120.0,
            ViewportClass::Medium => 160.0,
            ViewportClass::Wide => 190.0,
        }
    }

    /// Y-axis rotation per offset step, in degrees.
    pub const fn tilt(self) -> f32 {
        match self {
            ViewportClass::Narrow => -14.0,
            ViewportClass::Medium => -18.0,
            ViewportClass::Wide => -20.0,
        }
    }
}

/// One card of the projected window.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ProjectedItem {
    /// Absolute index into the result list.
    pub index: usize,
    /// Signed circular distance from the focus.
    pub offset: i64,
    /// Horizontal displacement in px.
    pub x: f32,
    /// Y-axis rotation in degrees.
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Blur radius in px.
    pub blur: f32,
    /// Stacking depth; the focused card carries the highest value.
    pub depth: i64,
}

impl ProjectedItem {
    /// Exactly one projected item is focused whenever the list is non-empty.
    /// Only this item is eligible for primary actions.
    pub fn is_focused(&self) -> bool {
        self.offset == 0
    }
}

const SCALE_STEP: f32 = 0.04;
const SCALE_FLOOR: f32 = 0.86;
const OPACITY_STEP: f32 = 0.08;
const OPACITY_FLOOR: f32 = 0.45;
const BLUR_STEP: f32 = 0.4;
const BLUR_CAP: f32 = 2.0;
const DEPTH_BASE: i64 = 1000;

/// Focus index after one forward step, wrapping past the end.
/// An empty list leaves the focus untouched.
pub fn wrap_advance(focus: usize, len: usize) -> usize {
    if len == 0 {
        return focus;
    }
    (focus + 1) % len
}

/// Focus index after one backward step, wrapping past the start.
pub fn wrap_retreat(focus: usize, len: usize) -> usize {
    if len == 0 {
        return focus;
    }
    (focus as i64 - 1).rem_euclid(len as i64) as usize
}

/// Shortest-path circular distance from `focus` to `index`. Offsets beyond
/// half the circle wrap to the shorter direction; an offset of exactly half
/// keeps the sign of the raw difference.
pub fn signed_offset(index: usize, focus: usize, len: usize) -> i64 {
    let len = len as i64;
    let mut offset = index as i64 - focus as i64;
    if offset > len / 2 {
        offset -= len;
    }
    if offset < -(len / 2) {
        offset += len;
    }
    offset
}

/// Project the visible window around `focus`. Items within the class span
/// are returned sorted by ascending |offset|, the positive side first on
/// ties, so the focused card leads the list.
pub fn project(len: usize, focus: usize, class: ViewportClass) -> Vec<ProjectedItem> {
    if len == 0 {
        return Vec::new();
    }
    let span = class.span();
    let gap = class.gap();
    let tilt = class.tilt();

    let mut window = Vec::with_capacity(len.min(2 * span as usize + 1));
    for index in 0..len {
        let offset = signed_offset(index, focus, len);
        let distance = offset.abs();
        if distance > span {
            continue;
        }
        window.push(ProjectedItem {
            index,
            offset,
            x: offset as f32 * gap,
            rotation: offset as f32 * tilt,
            scale: (1.0 - distance as f32 * SCALE_STEP).max(SCALE_FLOOR),
            opacity: (1.0 - distance as f32 * OPACITY_STEP).max(OPACITY_FLOOR),
            blur: (distance as f32 * BLUR_STEP).min(BLUR_CAP),
            depth: DEPTH_BASE - distance,
        });
    }
    window.sort_by_key(|item| (item.offset.abs(), item.offset.is_negative()));
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_and_retreat_wrap_at_the_boundaries() {
        assert_eq!(wrap_advance(4, 5), 0);
        assert_eq!(wrap_retreat(0, 5), 4);
        assert_eq!(wrap_advance(2, 5), 3);
        assert_eq!(wrap_retreat(3, 5), 2);
    }

    #[test]
    fn advance_then_retreat_restores_focus() {
        for len in 1..=7 {
            for focus in 0..len {
                assert_eq!(wrap_retreat(wrap_advance(focus, len), len), focus);
                assert_eq!(wrap_advance(wrap_retreat(focus, len), len), focus);
            }
        }
    }

    #[test]
    fn empty_list_leaves_focus_untouched() {
        assert_eq!(wrap_advance(0, 0), 0);
        assert_eq!(wrap_retreat(0, 0), 0);
    }

    #[test]
    fn signed_offset_takes_the_shorter_way_around() {
        // len 5, focus 0: indices 3 and 4 are closer going backward.
        let offsets: Vec<i64> = (0..5).map(|i| signed_offset(i, 0, 5)).collect();
        assert_eq!(offsets, vec![0, 1, 2, -2, -1]);
    }

    #[test]
    fn signed_offset_keeps_raw_sign_at_exact_half() {
        assert_eq!(signed_offset(3, 0, 6), 3);
        assert_eq!(signed_offset(0, 3, 6), -3);
    }

    #[test]
    fn five_items_focus_zero_projects_in_ring_order() {
        let window = project(5, 0, ViewportClass::Narrow);
        let offsets: Vec<i64> = window.iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![0, 1, -1, 2, -2]);
        let indices: Vec<usize> = window.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 4, 2, 3]);
    }

    #[test]
    fn window_never_exceeds_span_capacity() {
        assert!(project(0, 0, ViewportClass::Narrow).is_empty());
        for len in 1..30 {
            for focus in 0..len {
                let window = project(len, focus, ViewportClass::Narrow);
                assert!(window.len() <= len.min(7));
                assert!(window.iter().any(|p| p.offset == 0));
            }
        }
    }

    #[test]
    fn transforms_follow_offset_distance() {
        let window = project(20, 0, ViewportClass::Medium);
        let at = |offset: i64| *window.iter().find(|p| p.offset == offset).unwrap();

        let focused = at(0);
        assert_eq!(focused.x, 0.0);
        assert_eq!(focused.scale, 1.0);
        assert_eq!(focused.opacity, 1.0);
        assert_eq!(focused.blur, 0.0);
        assert!(focused.is_focused());

        let near = at(1);
        assert_eq!(near.x, 160.0);
        assert_eq!(near.rotation, -18.0);
        assert!((near.scale - 0.96).abs() < 1e-4);
        assert!((near.opacity - 0.92).abs() < 1e-4);
        assert!((near.blur - 0.4).abs() < 1e-4);
        assert!(near.depth < focused.depth);

        // Far edge of the window hits the floors and the blur cap.
        let far = at(5);
        assert_eq!(far.scale, SCALE_FLOOR);
        assert!((far.opacity - 0.6).abs() < 1e-4);
        assert_eq!(far.blur, BLUR_CAP);
    }

    #[test]
    fn wide_viewport_floors_opacity() {
        let window = project(20, 0, ViewportClass::Wide);
        let edge = window.iter().find(|p| p.offset == 7).unwrap();
        assert_eq!(edge.opacity, OPACITY_FLOOR);
    }

    #[test]
    fn width_classes_split_at_768_and_1024() {
        assert_eq!(ViewportClass::from_width(500.0), ViewportClass::Narrow);
        assert_eq!(ViewportClass::from_width(767.9), ViewportClass::Narrow);
        assert_eq!(ViewportClass::from_width(768.0), ViewportClass::Medium);
        assert_eq!(ViewportClass::from_width(1024.0), ViewportClass::Wide);
    }
}
