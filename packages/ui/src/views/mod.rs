mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod widgets;
pub use widgets::{EmptyState, Loading, Notice, NoticeBanner, StatCard};

mod config_error;
pub use config_error::ConfigErrorView;

mod login;
pub use login::LoginView;

mod dashboard;
pub use dashboard::DashboardShell;

mod overview;
pub use overview::OverviewView;

mod users;
pub use users::UsersView;

mod user_detail;
pub use user_detail::UserDetailModal;

mod admins;
pub use admins::AdminsView;

mod broadcast;
pub use broadcast::BroadcastView;

mod ai_usage;
pub use ai_usage::AiUsageView;

mod feedback;
pub use feedback::FeedbackView;

mod logs;
pub use logs::LogsView;

mod settings;
pub use settings::SettingsView;
