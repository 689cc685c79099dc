//! Constituent outreach: templates, simulated dispatch, engagement log.

mod dispatch;
mod engagement;
mod templates;

pub use dispatch::{
    DispatchError, DispatchReceipt, Dispatcher, Sender, SimulatedDispatcher, DEFAULT_LATENCY_MS,
};
pub use engagement::{
    engagement_stats, EngagementError, EngagementLog, EngagementStats, JsonFileEngagementLog,
    MemoryEngagementLog, RECENT_ACTIVITY_LIMIT,
};
pub use templates::{
    builtin_templates, format_template, template_by_id, templates_by_category, FormattedMessage,
};
