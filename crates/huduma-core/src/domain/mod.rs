pub mod phone;
pub mod status;

pub use phone::{format_phone_display, is_valid_phone, normalize_phone, CanonicalPhone};
pub use status::{
    normalize_status_key, status_badge_class, BadgeStatus, StatusStyles, DEFAULT_BADGE_CLASS,
};
