pub mod config;
pub mod event;
pub mod gesture;
pub mod layout;
pub mod loader;
pub mod markings;
pub mod sync;
pub mod traits;
pub mod transitions;
pub mod velocity;
pub mod view;

pub use config::{AgendaConfig, CalendarMode, ConfigError, KnobFrame, Renderers};
pub use event::{AgendaEvent, KnobBand, PointerTranslator};
pub use gesture::{GestureStateMachine, HeaderState, SnapTarget};
pub use layout::{Geometry, LayoutCoordinator, Readiness, HEADER_HEIGHT, KNOB_HEIGHT};
pub use loader::MonthLoadDebouncer;
pub use markings::{generate_markings, DayMarking, Markings};
pub use sync::{interpolate, ScrollSynchronizer};
pub use traits::{CalendarGrid, CalendarGridConfig, DayList, ItemMap, MarkingType};
pub use transitions::{Easing, ScalarTransition, TransitionConfig};
pub use velocity::VelocityTracker;
pub use view::AgendaView;
