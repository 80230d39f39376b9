pub mod admin;
pub mod broadcast;
pub mod feedback;
pub mod log;
pub mod stats;
pub mod timestamp;
pub mod usage;
pub mod user;

pub use admin::{
    AdminAccount, AdminInfo, AdminRole, Credentials, MessageResponse, NewAdmin, PasswordChange,
    ProfileUpdate, Session,
};
pub use broadcast::{BroadcastRequest, BroadcastResult, BroadcastTarget, NotificationType};
pub use feedback::{FeedbackCategory, FeedbackItem, FeedbackStatus};
pub use log::AdminActionLog;
pub use stats::{BroadcastStats, SystemStats, UserStats};
pub use usage::{
    FeatureBreakdown, FeatureType, FeatureUsage, Provider, UsageRecord, UsageStats, UserUsage,
};
pub use user::{SubscriptionType, SubscriptionUpdate, UserDetail, UserSummary};
