use std::time::Instant;

use chrono::{Datelike, NaiveDate};

use crate::config::{AgendaConfig, CalendarMode, ConfigError, KnobFrame, Renderers};
use crate::event::AgendaEvent;
use crate::gesture::{GestureStateMachine, HeaderState, SnapTarget};
use crate::layout::{Geometry, LayoutCoordinator, Readiness};
use crate::loader::MonthLoadDebouncer;
use crate::markings::{generate_markings, Markings};
use crate::sync::ScrollSynchronizer;
use crate::traits::{CalendarGrid, CalendarGridConfig, DayList, ItemMap};

/// Caller-facing callbacks. All optional.
#[derive(Default)]
struct Callbacks {
    day_press: Option<Box<dyn FnMut(NaiveDate)>>,
    day_changed: Option<Box<dyn FnMut(NaiveDate)>>,
    calendar_toggled: Option<Box<dyn FnMut(bool)>>,
    month_visible: Option<Box<dyn FnMut(NaiveDate)>>,
}

/// The calendar-with-agenda controller.
///
/// Owns the gesture state machine, the animated scroll scalar, the layout
/// coordinator and the selection state, and drives the two collaborators
/// (`C`: month grid, `L`: day-item list) through their traits. `T` is the
/// caller's item type, `R` the host's render-tree node type.
///
/// Event flow: the host feeds [`AgendaEvent`]s and collaborator
/// notifications in, calls [`AgendaView::tick`] once per frame, and reads
/// the derived transforms back out through [`AgendaView::sync`].
pub struct AgendaView<T, R, C, L> {
    config: AgendaConfig,
    renderers: Renderers<T, R>,
    calendar: C,
    list: L,
    layout: LayoutCoordinator,
    sync: ScrollSynchronizer,
    gesture: GestureStateMachine,
    loader: MonthLoadDebouncer,
    callbacks: Callbacks,
    items: ItemMap<T>,
    selected_day: NaiveDate,
    top_day: NaiveDate,
    calendar_scrollable: bool,
    needs_render: bool,
    torn_down: bool,
}

impl<T, R, C, L> std::fmt::Debug for AgendaView<T, R, C, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgendaView")
            .field("selected_day", &self.selected_day)
            .field("top_day", &self.top_day)
            .field("calendar_scrollable", &self.calendar_scrollable)
            .field("needs_render", &self.needs_render)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl<T, R, C: CalendarGrid, L: DayList<T>> AgendaView<T, R, C, L> {
    /// Validate the configuration and assemble the view.
    ///
    /// The view starts before its first layout: geometry is zero, the
    /// header renders at height 0 and the calendar's own scrolling is
    /// disabled until a gesture snap enables it.
    pub fn new(
        config: AgendaConfig,
        renderers: Renderers<T, R>,
        calendar: C,
        list: L,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let selected_day = config.selected_day;
        Ok(Self {
            config,
            renderers,
            calendar,
            list,
            layout: LayoutCoordinator::new(),
            sync: ScrollSynchronizer::new(Geometry::new(0.0, 0.0)),
            gesture: GestureStateMachine::new(),
            loader: MonthLoadDebouncer::new(),
            callbacks: Callbacks::default(),
            items: ItemMap::new(),
            selected_day,
            top_day: selected_day,
            calendar_scrollable: false,
            needs_render: true,
            torn_down: false,
        })
    }

    // -------------------------------------------------------------------------
    // Callbacks
    // -------------------------------------------------------------------------

    pub fn on_day_press(&mut self, f: impl FnMut(NaiveDate) + 'static) {
        self.callbacks.day_press = Some(Box::new(f));
    }

    pub fn on_day_changed(&mut self, f: impl FnMut(NaiveDate) + 'static) {
        self.callbacks.day_changed = Some(Box::new(f));
    }

    pub fn on_calendar_toggled(&mut self, f: impl FnMut(bool) + 'static) {
        self.callbacks.calendar_toggled = Some(Box::new(f));
    }

    pub fn on_month_visible(&mut self, f: impl FnMut(NaiveDate) + 'static) {
        self.callbacks.month_visible = Some(Box::new(f));
    }

    // -------------------------------------------------------------------------
    // Event handling
    // -------------------------------------------------------------------------

    /// Feed one gesture/layout event. Gesture events are ignored while the
    /// knob is hidden; without a knob there is no gesture surface.
    pub fn handle_event(&mut self, event: AgendaEvent, now: Instant) {
        match event {
            AgendaEvent::Layout { width, height } => self.on_viewport_layout(width, height),
            _ if !self.knob_enabled() => {}
            AgendaEvent::TouchStart => {
                self.gesture.touch_start();
                self.needs_render = true;
            }
            AgendaEvent::TouchEnd => {
                let geometry = self.sync.geometry();
                if let Some(target) = self.gesture.touch_end(self.sync.position(), &geometry) {
                    self.apply_settle(target, now);
                }
                self.needs_render = true;
            }
            AgendaEvent::DragStart => {
                self.gesture.drag_start();
            }
            AgendaEvent::DragMove { y } => {
                self.gesture.record(now, y);
                self.sync.on_scroll(y);
                self.needs_render = true;
            }
            AgendaEvent::DragEnd { y } => {
                let geometry = self.sync.geometry();
                if let Some(target) = self.gesture.drag_end(now, y, &geometry) {
                    self.sync.on_scroll(y);
                    self.apply_settle(target, now);
                }
                self.needs_render = true;
            }
        }
    }

    /// The container viewport was measured. Recomputes every interpolation
    /// domain and re-clamps the position.
    pub fn on_viewport_layout(&mut self, width: f32, height: f32) {
        let geometry = self.layout.on_viewport_layout(width, height);
        self.sync.set_geometry(geometry);
        self.needs_render = true;
    }

    /// The scroll pad reported its own first layout: position it at the
    /// fully-collapsed end, un-animated, before the header becomes visible.
    pub fn on_scroll_pad_layout(&mut self, now: Instant) {
        self.layout.on_scroll_pad_layout();
        self.sync
            .set_scroll_pad_position(self.layout.initial_scroll_pad_position(), false, now);
        self.needs_render = true;
    }

    /// Advance animations, readiness and the load debouncer one frame.
    /// Returns true while a settle is still in flight.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.layout.tick();
        let was_settling = self.sync.is_settling();
        let settling = self.sync.tick(now);
        if was_settling || settling {
            self.needs_render = true;
        }
        if let Some(month) = self.loader.poll(now) {
            log::debug!("[view] debounced load fires for {month}");
            if let Some(cb) = self.callbacks.month_visible.as_mut() {
                cb(month);
            }
        }
        settling
    }

    /// Apply a snap decision: animate toward the endpoint and gate the
    /// calendar's own scrolling. Idempotent: settling to an endpoint the
    /// view is already resting at changes nothing and fires nothing.
    fn apply_settle(&mut self, target: SnapTarget, now: Instant) {
        let geometry = self.sync.geometry();
        let y = target.position(&geometry);
        let scrollable = target == SnapTarget::Collapsed;
        let at_rest = !self.sync.is_settling() && self.sync.position() == y;
        if at_rest && self.calendar_scrollable == scrollable {
            return;
        }
        if !at_rest {
            self.sync.set_scroll_pad_position(y, true, now);
        }
        if self.calendar_scrollable != scrollable {
            self.calendar_scrollable = scrollable;
            self.calendar.set_scroll_enabled(scrollable);
            if let Some(cb) = self.callbacks.calendar_toggled.as_mut() {
                cb(scrollable);
            }
        }
        self.needs_render = true;
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// A day was chosen on the calendar.
    ///
    /// With `optimistic_scroll` the list's top day is left alone until the
    /// list itself reports a day change, avoiding a visible jump while the
    /// user is still scrolling it.
    pub fn choose_day(&mut self, day: NaiveDate, optimistic_scroll: bool, now: Instant) {
        if self.torn_down {
            return;
        }
        log::debug!("[view] choose day {day} (optimistic scroll: {optimistic_scroll})");
        self.selected_day = day;
        self.list.set_selected_day(day);
        if !optimistic_scroll {
            self.top_day = day;
            self.list.set_top_day(day);
        }
        if self.calendar_scrollable {
            self.calendar_scrollable = false;
            self.calendar.set_scroll_enabled(false);
            if let Some(cb) = self.callbacks.calendar_toggled.as_mut() {
                cb(false);
            }
        }
        let geometry = self.sync.geometry();
        self.sync
            .set_scroll_pad_position(geometry.max_scroll_y(), true, now);
        self.calendar
            .scroll_to_date(day, geometry.calendar_offset(), true);
        self.push_markings();
        if let Some(cb) = self.callbacks.month_visible.as_mut() {
            cb(first_of_month(day));
        }
        if let Some(cb) = self.callbacks.day_press.as_mut() {
            cb(day);
        }
        self.needs_render = true;
    }

    /// The list's visible top day changed during scroll. Re-centers the
    /// calendar, animated only when staying within the same month so a
    /// month-boundary crossing does not lurch.
    pub fn day_changed_from_list(&mut self, day: NaiveDate) {
        if self.torn_down {
            return;
        }
        let animated = same_month(day, self.selected_day);
        let geometry = self.sync.geometry();
        self.calendar
            .scroll_to_date(day, geometry.calendar_offset(), animated);
        self.selected_day = day;
        self.top_day = day;
        self.list.set_selected_day(day);
        self.list.set_top_day(day);
        self.push_markings();
        if let Some(cb) = self.callbacks.day_changed.as_mut() {
            cb(day);
        }
        self.needs_render = true;
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    /// The grid's visible months changed. While no items are loaded yet,
    /// debounce a load request for the first visible month.
    pub fn on_visible_months_changed(&mut self, months: &[NaiveDate], now: Instant) {
        if self.torn_down {
            return;
        }
        if self.items.is_empty() {
            self.loader.schedule(months, now);
        }
    }

    /// Replace the item map. Cancels any pending debounced load.
    pub fn set_items(&mut self, items: ItemMap<T>) {
        self.items = items;
        self.loader.cancel();
        self.list.set_items(&self.items);
        self.push_markings();
        self.needs_render = true;
    }

    pub fn items(&self) -> &ItemMap<T> {
        &self.items
    }

    // -------------------------------------------------------------------------
    // Markings
    // -------------------------------------------------------------------------

    /// Marking overlay for the current render: caller marks or synthesized
    /// item presence, with the selection merged in.
    pub fn generate_markings(&self) -> Markings {
        generate_markings(
            self.config.marked_dates.as_ref(),
            &self.items,
            self.selected_day,
        )
    }

    fn push_markings(&mut self) {
        let markings = self.generate_markings();
        self.calendar.set_markings(&markings);
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Render the knob through the caller's delegate.
    ///
    /// Returns `None` when the knob is hidden (configuration or horizontal
    /// mode). Panics if the knob is visible but no renderer was supplied,
    /// since a silently missing knob breaks the entire gesture surface.
    pub fn render_knob(&self) -> Option<R> {
        if !self.knob_enabled() {
            return None;
        }
        let Some(renderer) = self.renderers.knob_renderer() else {
            panic!(
                "dayfold: a knob renderer is required while the knob is visible; \
                 supply Renderers::knob or hide the knob"
            );
        };
        Some(renderer(KnobFrame {
            offset: self.sync.knob_offset(),
            pressed: self.gesture.knob_pressed(),
        }))
    }

    /// Render one agenda day through the caller's delegates: the day-cell
    /// renderer for days with items, the empty-state renderer for days
    /// known to be empty.
    pub fn render_day(&self, day: NaiveDate) -> Option<R> {
        match self.items.get(&day) {
            Some(Some(list)) if !list.is_empty() => self
                .renderers
                .day_cell_renderer()
                .map(|f| f(day, Some(list.as_slice()))),
            Some(_) => self
                .renderers
                .empty_day_renderer()
                .map(|f| f(day))
                .or_else(|| self.renderers.day_cell_renderer().map(|f| f(day, None))),
            None => self.renderers.day_cell_renderer().map(|f| f(day, None)),
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Tear the view down. Every later event, tick or deferred load request
    /// becomes a guarded no-op.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.loader.teardown();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The knob gesture surface only exists for a visible knob in vertical
    /// mode.
    pub fn knob_enabled(&self) -> bool {
        !self.config.hide_knob && self.config.mode == CalendarMode::Vertical
    }

    /// Read-only view of the scroll synchronizer and its derived
    /// transforms. All writes go through events and snaps.
    pub fn sync(&self) -> &ScrollSynchronizer {
        &self.sync
    }

    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day
    }

    pub fn top_day(&self) -> NaiveDate {
        self.top_day
    }

    pub fn calendar_scrollable(&self) -> bool {
        self.calendar_scrollable
    }

    pub fn header_state(&self) -> HeaderState {
        self.gesture.state()
    }

    pub fn knob_pressed(&self) -> bool {
        self.gesture.knob_pressed()
    }

    pub fn readiness(&self) -> Readiness {
        self.layout.readiness()
    }

    pub fn header_render_height(&self) -> f32 {
        self.layout.header_render_height()
    }

    /// Grid configuration derived from the agenda configuration and the
    /// current scrollable gate.
    pub fn grid_config(&self) -> CalendarGridConfig {
        CalendarGridConfig::from_agenda(&self.config, self.calendar_scrollable)
    }

    pub fn config(&self) -> &AgendaConfig {
        &self.config
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut C {
        &mut self.calendar
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }

    /// Consume the dirty flag for this frame.
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}
