//! Board state for the pinch-drag demo.
//! Rectangles, the single drag session, and score bookkeeping live here; the
//! module has no DOM dependencies so the whole state machine is unit tested.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::draw::Surface;

/// Points awarded the first time a rectangle is dropped on the target half.
pub const SCORE_INCREMENT: u32 = 25;

/// Stable identity of a rectangle, assigned in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RectId(pub usize);

/// Placement and colour of a rectangle before it is added to the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl RectSpec {
    pub fn new(x: f64, y: f64, width: f64, height: f64, color: &str) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: RectId,
    /// Top-left corner in canvas pixels. The only mutable part of a rectangle.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl Rectangle {
    /// Edges are inclusive.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Which input device owns the active drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Gesture,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub rect: RectId,
    /// Pointer position minus rectangle origin, captured at drag start.
    pub offset_x: f64,
    pub offset_y: f64,
    pub source: DragSource,
}

/// Last reported hand state, kept for the feedback line only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandPose {
    pub x: f64,
    pub y: f64,
    pub pinching: bool,
    pub closed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreState {
    pub score: u32,
    pub increment: u32,
    scored: BTreeSet<RectId>,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::with_increment(SCORE_INCREMENT)
    }
}

impl ScoreState {
    pub fn with_increment(increment: u32) -> Self {
        Self {
            score: 0,
            increment,
            scored: BTreeSet::new(),
        }
    }

    /// Credits `id` once. Returns true only on the first credit.
    pub fn award(&mut self, id: RectId) -> bool {
        if !self.scored.insert(id) {
            return false;
        }
        self.score = self.score.saturating_add(self.increment);
        true
    }

    #[cfg(test)]
    pub fn is_scored(&self, id: RectId) -> bool {
        self.scored.contains(&id)
    }

    pub fn scored_count(&self) -> usize {
        self.scored.len()
    }
}

/// What a single input step did to the drag session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    Began(RectId),
    Moved(RectId),
    Released { rect: RectId, awarded: bool },
}

#[derive(Clone, Debug)]
pub struct RectangleManager {
    rectangles: Vec<Rectangle>,
    drag: Option<DragSession>,
    score: ScoreState,
    hand: HandPose,
    /// Scoring midline is half of this.
    canvas_width: f64,
}

impl RectangleManager {
    #[cfg(test)]
    pub fn new(canvas_width: f64) -> Self {
        Self::with_score(canvas_width, ScoreState::default())
    }

    pub fn with_score(canvas_width: f64, score: ScoreState) -> Self {
        Self {
            rectangles: Vec::new(),
            drag: None,
            score,
            hand: HandPose::default(),
            canvas_width,
        }
    }

    pub fn add_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) -> RectId {
        let id = RectId(self.rectangles.len());
        self.rectangles.push(Rectangle {
            id,
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
        id
    }

    pub fn set_canvas_width(&mut self, width: f64) {
        self.canvas_width = width;
    }

    #[cfg(test)]
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn rectangle(&self, id: RectId) -> Option<&Rectangle> {
        self.rectangles.get(id.0)
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    pub fn scored_count(&self) -> usize {
        self.score.scored_count()
    }

    #[cfg(test)]
    pub fn is_scored(&self, id: RectId) -> bool {
        self.score.is_scored(id)
    }

    pub fn dragged(&self) -> Option<RectId> {
        self.drag.map(|d| d.rect)
    }

    #[cfg(test)]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    #[cfg(test)]
    pub fn drag_source(&self) -> Option<DragSource> {
        self.drag.map(|d| d.source)
    }

    #[cfg(test)]
    pub fn hand(&self) -> HandPose {
        self.hand
    }

    /// Topmost (last added) rectangle under the point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<RectId> {
        self.rectangles
            .iter()
            .rev()
            .find(|r| r.contains(x, y))
            .map(|r| r.id)
    }

    fn begin_drag(&mut self, x: f64, y: f64, source: DragSource) -> Option<DragEvent> {
        // one session at a time; the other device cannot steal it
        if let Some(active) = self.drag {
            if active.source != source {
                return None;
            }
        }
        let id = self.hit_test(x, y)?;
        let r = &self.rectangles[id.0];
        self.drag = Some(DragSession {
            rect: id,
            offset_x: x - r.x,
            offset_y: y - r.y,
            source,
        });
        Some(DragEvent::Began(id))
    }

    fn move_drag(&mut self, x: f64, y: f64, source: DragSource) -> Option<DragEvent> {
        let d = self.drag.filter(|d| d.source == source)?;
        let r = self.rectangles.get_mut(d.rect.0)?;
        r.x = x - d.offset_x;
        r.y = y - d.offset_y;
        Some(DragEvent::Moved(d.rect))
    }

    fn end_drag(&mut self, source: DragSource) -> Option<DragEvent> {
        let d = self.drag.filter(|d| d.source == source)?;
        self.drag = None;
        let awarded = self.check_score(d.rect);
        Some(DragEvent::Released {
            rect: d.rect,
            awarded,
        })
    }

    fn check_score(&mut self, id: RectId) -> bool {
        let Some(r) = self.rectangles.get(id.0) else {
            return false;
        };
        let (cx, _) = r.center();
        if cx > self.canvas_width / 2.0 {
            self.score.award(id)
        } else {
            false
        }
    }

    /// Per-frame gesture input. Pinch transitions are detected against the
    /// previous call's `pinching` flag.
    pub fn update_hand_position(
        &mut self,
        x: f64,
        y: f64,
        pinching: bool,
        closed: bool,
    ) -> Option<DragEvent> {
        let was_pinching = self.hand.pinching;
        self.hand = HandPose {
            x,
            y,
            pinching,
            closed,
        };
        match (was_pinching, pinching) {
            (false, true) => self.begin_drag(x, y, DragSource::Gesture),
            (true, true) => self.move_drag(x, y, DragSource::Gesture),
            (true, false) => self.end_drag(DragSource::Gesture),
            (false, false) => None,
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<DragEvent> {
        self.begin_drag(x, y, DragSource::Pointer)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<DragEvent> {
        self.move_drag(x, y, DragSource::Pointer)
    }

    pub fn pointer_up(&mut self) -> Option<DragEvent> {
        self.end_drag(DragSource::Pointer)
    }

    /// Rectangles, the gesture feedback line, then the score overlay.
    pub fn draw<S: Surface + ?Sized>(&self, s: &mut S) {
        let dragged = self.dragged();
        for r in &self.rectangles {
            let active = dragged == Some(r.id);
            s.set_fill_style(if active { "#FFD700" } else { r.color.as_str() });
            s.fill_rect(r.x, r.y, r.width, r.height);
            s.set_stroke_style(if active { "#FF6B00" } else { "#333" });
            s.set_line_width(if active { 4.0 } else { 2.0 });
            s.stroke_rect(r.x, r.y, r.width, r.height);
        }

        if let Some(d) = self.drag.filter(|d| d.source == DragSource::Gesture) {
            if let Some(r) = self.rectangle(d.rect) {
                let (cx, cy) = r.center();
                s.set_stroke_style(if self.hand.closed { "#FF0000" } else { "#FF00FF" });
                s.set_line_width(3.0);
                s.set_line_dash(&[5.0, 5.0]);
                s.line(self.hand.x, self.hand.y, cx, cy);
                s.set_line_dash(&[]);
            }
        }

        let label = format!("Score: {}", self.score());
        s.set_fill_style("#FFFFFF");
        s.set_font("bold 32px Arial");
        s.set_stroke_style("#000000");
        s.set_line_width(3.0);
        s.stroke_text(&label, 20.0, 50.0);
        s.fill_text(&label, 20.0, 50.0);
    }
}
