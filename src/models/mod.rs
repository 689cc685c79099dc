//! Data models for Stairwell.

mod address;
mod district;
mod engagement;
mod feed_item;
mod legislator;
mod template;

pub use address::{Address, Coordinates};
pub use district::{District, DistrictKind};
pub use engagement::{ContactAction, ContactMethod, ContactStatus, NewContactAction};
pub use feed_item::{FeedItem, NewFeedItem};
pub use legislator::{Chamber, ContactChannels, Legislator, Party, SocialHandles, StairPosition};
pub use template::{MessageTemplate, TemplateCategory, TemplateTone};
