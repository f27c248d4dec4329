mod axis_config;
mod axis_labels;
mod axis_render_frame_builder;
mod drawn_subscriptions;
mod time_axis;
mod time_axis_navigation;

pub use axis_config::{AxisStyle, TimeAxisConfig};
pub use drawn_subscriptions::SubscriptionId;
pub use time_axis::TimeAxis;
