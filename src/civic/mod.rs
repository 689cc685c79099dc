//! District and legislator resolution.
//!
//! Coordinates come in from the geocoder; districts and legislators come
//! out. Both backends sit behind traits so the shipped placeholder data can
//! be swapped for a real boundary service without touching the lookup flow.

mod lookup;
mod resolver;

pub use lookup::{LookupError, LookupResult, RepresentativeLookup};
pub use resolver::{
    CivicError, DistrictResolver, LegislatorDirectory, StaticDistrictResolver,
    StaticLegislatorDirectory,
};
