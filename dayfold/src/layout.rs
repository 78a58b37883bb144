/// Total height of the collapsed header band (weekday strip + knob area).
pub const HEADER_HEIGHT: f32 = 138.0;

/// Height of the knob band at the bottom of the header.
pub const KNOB_HEIGHT: f32 = 54.0;

/// Base used to derive the calendar scroll offset from the viewport height.
const CALENDAR_OFFSET_BASE: f32 = 96.0;

/// Measured viewport dimensions plus everything derived from them.
///
/// Owned by [`LayoutCoordinator`]; read-only everywhere else. All
/// interpolation domains in the scroll synchronizer flow from here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Geometry {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }

    /// The fully-collapsed scroll position: 0 = calendar expanded,
    /// `max_scroll_y` = calendar collapsed with the agenda filling the view.
    pub fn max_scroll_y(&self) -> f32 {
        (self.viewport_height - HEADER_HEIGHT).max(0.0)
    }

    /// Threshold between snapping open and snapping closed.
    pub fn snap_midpoint(&self) -> f32 {
        self.max_scroll_y() / 2.0
    }

    /// Vertical offset handed to the calendar collaborator when centering a
    /// date.
    pub fn calendar_offset(&self) -> f32 {
        CALENDAR_OFFSET_BASE - self.viewport_height / 2.0
    }
}

/// Readiness of the header/scroll-pad pair.
///
/// The header renders at height 0 until the scroll pad has been positioned
/// at the collapsed end, and at full height one tick later. The staged flag
/// replaces a deferred-tick workaround with an explicit signal chain:
/// viewport layout -> pad layout acknowledged -> next tick -> ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    #[default]
    HeaderHidden,
    PadPositioned,
    Ready,
}

/// Tracks the container viewport and the two-phase readiness flag.
#[derive(Debug, Default)]
pub struct LayoutCoordinator {
    geometry: Option<Geometry>,
    readiness: Readiness,
}

impl LayoutCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a viewport measurement. Every call after the first forces the
    /// caller to re-derive dependent state; returns the new geometry.
    pub fn on_viewport_layout(&mut self, width: f32, height: f32) -> Geometry {
        let geometry = Geometry::new(width, height);
        if self.geometry != Some(geometry) {
            log::debug!(
                "[layout] viewport {}x{}, max_scroll_y {}",
                width,
                height,
                geometry.max_scroll_y()
            );
        }
        self.geometry = Some(geometry);
        geometry
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Where the scroll pad starts: the fully-collapsed position.
    pub fn initial_scroll_pad_position(&self) -> f32 {
        self.geometry.map(|g| g.max_scroll_y()).unwrap_or(0.0)
    }

    /// The scroll pad reported its own first layout; it is now safe to
    /// position it without a visible jump.
    pub fn on_scroll_pad_layout(&mut self) {
        if self.readiness == Readiness::HeaderHidden {
            self.readiness = Readiness::PadPositioned;
            log::debug!("[layout] scroll pad positioned");
        }
    }

    /// Advance the readiness flag one stage per tick.
    pub fn tick(&mut self) {
        if self.readiness == Readiness::PadPositioned {
            self.readiness = Readiness::Ready;
            log::debug!("[layout] calendar ready");
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    /// Height the header should render at right now: 0 until ready, to
    /// avoid a flash before the scroll pad is positioned.
    pub fn header_render_height(&self) -> f32 {
        if self.is_ready() {
            HEADER_HEIGHT
        } else {
            0.0
        }
    }
}
