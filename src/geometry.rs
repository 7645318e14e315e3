//! Axis-aligned rectangles in world units.

/// Width and height of a sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Size { w, h }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn from_center(size: Size, (cx, cy): (i32, i32)) -> Self {
        Rect::new(cx - size.w / 2, cy - size.h / 2, size.w, size.h)
    }

    /// A rect whose bottom edge is centred on `point`.
    pub fn from_midbottom(size: Size, (mx, my): (i32, i32)) -> Self {
        Rect::new(mx - size.w / 2, my - size.h, size.w, size.h)
    }

    /// A rect whose top edge is centred on `point`.
    pub fn from_midtop(size: Size, (mx, my): (i32, i32)) -> Self {
        Rect::new(mx - size.w / 2, my, size.w, size.h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn midtop(&self) -> (i32, i32) {
        (self.center_x(), self.top())
    }

    pub fn midbottom(&self) -> (i32, i32) {
        (self.center_x(), self.bottom())
    }

    /// Strict intersection: rects that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Point test with both edges inclusive, as used for click hot spots.
    pub fn contains_inclusive(&self, (px, py): (i32, i32)) -> bool {
        (self.left()..=self.right()).contains(&px) && (self.top()..=self.bottom()).contains(&py)
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
        assert!(!a.overlaps(&Rect::new(0, 10, 10, 10)));
        assert!(a.overlaps(&Rect::new(9, 9, 10, 10)));
    }

    #[test]
    fn anchored_constructors() {
        let size = Size::new(10, 20);
        assert_eq!(Rect::from_center(size, (100, 100)), Rect::new(95, 90, 10, 20));
        assert_eq!(Rect::from_midbottom(size, (100, 100)).midbottom(), (100, 100));
        assert_eq!(Rect::from_midtop(size, (100, 100)).midtop(), (100, 100));
    }

    #[test]
    fn hot_spot_edges_are_inclusive() {
        let r = Rect::new(700, 20, 60, 60);
        assert!(r.contains_inclusive((700, 20)));
        assert!(r.contains_inclusive((760, 80)));
        assert!(!r.contains_inclusive((761, 50)));
    }
}
