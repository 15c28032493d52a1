pub mod animator;
pub mod config;
pub mod corrector;
pub mod easing;
pub mod engine;
pub mod error;
pub mod filter;
pub mod logging;
pub mod observer;
pub mod region;
pub mod timing;
pub mod view;

pub use animator::{ScrollAnimator, ScrollBehavior, ScrollTarget};
pub use config::{AnimationConfig, StickyConfig};
pub use easing::EasingType;
pub use engine::{ScrollSnapshot, Scroller, ScrollerMetrics, StickyScroll};
pub use error::{Error, Result};
pub use observer::SubscriptionId;
pub use region::{ScrollMetrics, ScrollRegion};
pub use view::{compute_view_state, Mode, ViewState};
