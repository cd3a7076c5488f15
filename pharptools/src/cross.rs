//! Crosshair markers for reading positions and differences off a plot
//!
//! One crosshair follows the pointer. Two more are placed by clicking, the
//! clicks alternating between them, and every click reports its difference
//! from the click before. So two clicks give the distance (in time and
//! counts) between two features of a histogram.
//!
//! The very first click is diffed against the origin, since there is no
//! earlier click. That delta is just the click position and does not
//! measure anything; it is kept so that every click reports a delta.

use crate::Point;

/// Which persisted crosshair a click moves
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// Pointer input, already in plot coordinates
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Event {
    Move(Point),
    Click(Point),
}

/// Result of a click
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Placement {
    pub slot: Slot,
    pub position: Point,
    pub delta: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Crosshairs {
    live: Option<Point>,
    a: Option<Point>,
    b: Option<Point>,
    next: Slot,
    last_click: Point,
    delta: Option<Point>,
}

impl Default for Crosshairs {
    fn default() -> Self {
        Crosshairs {
            live: None,
            a: None,
            b: None,
            next: Slot::A,
            last_click: Point::ORIGIN,
            delta: None,
        }
    }
}

impl Crosshairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer event; clicks return what they placed
    pub fn handle(&mut self, ev: Event) -> Option<Placement> {
        match ev {
            Event::Move(p) => {
                self.on_move(p);
                None
            }
            Event::Click(p) => Some(self.on_click(p)),
        }
    }

    pub fn on_move(&mut self, p: Point) {
        self.live = Some(p);
    }

    pub fn on_click(&mut self, p: Point) -> Placement {
        let delta = p - self.last_click;
        let slot = self.next;
        match slot {
            Slot::A => self.a = Some(p),
            Slot::B => self.b = Some(p),
        }
        self.next = slot.other();
        self.last_click = p;
        self.delta = Some(delta);
        Placement {
            slot,
            position: p,
            delta,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn live(&self) -> Option<Point> {
        self.live
    }

    pub fn get(&self, slot: Slot) -> Option<Point> {
        match slot {
            Slot::A => self.a,
            Slot::B => self.b,
        }
    }

    pub fn next_slot(&self) -> Slot {
        self.next
    }

    pub fn last_click(&self) -> Point {
        self.last_click
    }

    /// Delta reported by the latest click
    pub fn delta(&self) -> Option<Point> {
        self.delta
    }
}
