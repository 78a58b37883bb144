use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Rows a pressed pointer must travel before the press becomes a drag.
const DRAG_SLOP_ROWS: u16 = 1;

/// Gesture-level events consumed by the view.
///
/// `DragMove`/`DragEnd` carry the mirrored scroll-pad position; a plain
/// `TouchEnd` has none because the pad never moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgendaEvent {
    /// Finger landed on the knob band.
    TouchStart,
    /// Finger lifted without the pad moving.
    TouchEnd,
    /// The pad started moving under the finger.
    DragStart,
    /// The pad moved; `y` is the mirrored pad position.
    DragMove { y: f32 },
    /// Finger lifted while the pad was moving.
    DragEnd { y: f32 },
    /// The container viewport was (re)measured.
    Layout { width: f32, height: f32 },
}

/// Terminal-row band occupied by the knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnobBand {
    pub top: u16,
    pub height: u16,
}

impl KnobBand {
    pub fn new(top: u16, height: u16) -> Self {
        Self { top, height }
    }

    pub fn contains(&self, row: u16) -> bool {
        row >= self.top && row < self.top + self.height
    }
}

/// Translates crossterm mouse events on the knob band into the touch/drag
/// lifecycle.
///
/// A press inside the band is a touch; once it travels past a small slop it
/// becomes a drag, and each further move mirrors a new pad position
/// (dragging down opens the calendar, so the position falls toward 0).
/// Events outside an active press are ignored.
#[derive(Debug)]
pub struct PointerTranslator {
    band: KnobBand,
    /// Position units per terminal row.
    row_units: f32,
    press_row: Option<u16>,
    dragging: bool,
    origin_position: f32,
    last_y: f32,
}

impl PointerTranslator {
    pub fn new(band: KnobBand, row_units: f32) -> Self {
        Self {
            band,
            row_units,
            press_row: None,
            dragging: false,
            origin_position: 0.0,
            last_y: 0.0,
        }
    }

    /// Move the band after a layout change.
    pub fn set_band(&mut self, band: KnobBand) {
        self.band = band;
    }

    /// Translate one mouse event. `pad_position` is the current mirrored
    /// scroll position, captured at press time as the drag origin.
    pub fn translate(&mut self, event: &MouseEvent, pad_position: f32) -> Vec<AgendaEvent> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.band.contains(event.row) {
                    return Vec::new();
                }
                self.press_row = Some(event.row);
                self.dragging = false;
                self.origin_position = pad_position;
                self.last_y = pad_position;
                vec![AgendaEvent::TouchStart]
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(press_row) = self.press_row else {
                    return Vec::new();
                };
                let delta_rows = i32::from(event.row) - i32::from(press_row);
                if !self.dragging {
                    if delta_rows.unsigned_abs() < u32::from(DRAG_SLOP_ROWS) {
                        return Vec::new();
                    }
                    self.dragging = true;
                    self.last_y = self.position_for(delta_rows);
                    return vec![
                        AgendaEvent::DragStart,
                        AgendaEvent::DragMove { y: self.last_y },
                    ];
                }
                self.last_y = self.position_for(delta_rows);
                vec![AgendaEvent::DragMove { y: self.last_y }]
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.press_row.take().is_none() {
                    return Vec::new();
                }
                if self.dragging {
                    self.dragging = false;
                    vec![AgendaEvent::DragEnd { y: self.last_y }]
                } else {
                    vec![AgendaEvent::TouchEnd]
                }
            }
            _ => Vec::new(),
        }
    }

    /// Dragging down (positive rows) pulls the calendar open: the pad
    /// position falls toward 0.
    fn position_for(&self, delta_rows: i32) -> f32 {
        self.origin_position - delta_rows as f32 * self.row_units
    }
}
