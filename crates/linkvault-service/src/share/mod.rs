//! Share links: issue a one-time link and redeem it at most once.

pub mod issuance;
pub mod link;
pub mod record;
pub mod redemption;
pub mod store;

pub use issuance::IssuanceService;
pub use record::{ShareLink, ShareLinkData};
pub use redemption::{LINK_UNAVAILABLE, RedemptionService};
pub use store::{Redemption, ShareLinkStore, UnavailableReason};
