use dashboard::OverviewController;
use dioxus::prelude::*;

use super::widgets::{Loading, StatCard};
use crate::format::count;
use crate::session::use_console;

#[component]
pub fn OverviewView() -> Element {
    let console = use_console();
    let mut overview = use_signal(OverviewController::new);

    let _loader = use_resource(move || async move {
        let Some(backend) = console.backend() else {
            return;
        };
        let ticket = overview.write().begin_load();
        let result = OverviewController::fetch(&backend).await;
        if let (Err(e), true) = (&result, overview.peek().is_current(ticket)) {
            console.load_failed("dashboard stats", e);
        }
        overview.write().finish_load(ticket, result);
    });

    let Some(data) = overview.read().data.clone() else {
        return rsx! {
            h1 { class: "view-title", "Overview" }
            Loading {}
        };
    };
    let users = data.users;
    let system = data.system;

    rsx! {
        h1 { class: "view-title", "Overview" }

        div {
            class: "stat-grid",
            StatCard { label: "Total Users", value: count(users.total_users) }
            StatCard { label: "Premium Users", value: count(users.premium_users) }
            StatCard { label: "Free Users", value: count(users.free_users) }
            StatCard { label: "Active (7 days)", value: count(users.active_users_last_7_days) }
            StatCard { label: "New Users (30d)", value: count(users.new_users_last_30_days) }
            StatCard { label: "Total Transactions", value: count(users.total_transactions) }
            StatCard { label: "Total Goals", value: count(users.total_goals) }
            StatCard { label: "Active Today", value: count(system.active_users_today) }
        }

        h2 { class: "view-section-title", "Growth" }
        div {
            class: "stat-grid",
            StatCard { label: "New Today", value: count(system.new_users_today) }
            StatCard { label: "New This Week", value: count(system.new_users_this_week) }
            StatCard { label: "New This Month", value: count(system.new_users_this_month) }
            StatCard { label: "Active This Week", value: count(system.active_users_this_week) }
        }

        h2 { class: "view-section-title", "Platform" }
        div {
            class: "stat-grid",
            StatCard { label: "Budgets", value: count(system.total_budgets) }
            StatCard { label: "Chat Sessions", value: count(system.total_chat_sessions) }
            StatCard { label: "Notifications", value: count(system.total_notifications) }
        }
    }
}
