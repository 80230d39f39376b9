use api::models::usage::{format_cost, humanize};
use api::{AdminBackend, FeatureBreakdown, FeatureType, FeatureUsage, UsageSort, UserUsage};
use chrono::NaiveDate;
use dashboard::{AiUsageController, Section};
use dioxus::prelude::*;

use super::modal_overlay::ModalOverlay;
use super::widgets::{EmptyState, Loading, StatCard};
use crate::format::{count, date_time};
use crate::icons::{FaChevronDown, FaChevronUp};
use crate::session::use_console;
use crate::Icon;

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[component]
fn SectionHeader(title: String, open: bool, on_toggle: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: "section-header",
            onclick: move |_| on_toggle.call(()),
            h2 { "{title}" }
            if open {
                Icon { icon: FaChevronUp, width: 16, height: 16 }
            } else {
                Icon { icon: FaChevronDown, width: 16, height: 16 }
            }
        }
    }
}

/// Per-feature cards followed by the feature group's totals.
#[component]
fn BreakdownPanel(breakdown: FeatureBreakdown) -> Element {
    let total = breakdown.total();
    let features: Vec<(String, FeatureUsage)> =
        breakdown.features().map(|(name, usage)| (humanize(name), usage.clone())).collect();

    rsx! {
        div {
            class: "panel",
            if features.is_empty() {
                EmptyState { message: "No usage in this period" }
            }
            div {
                class: "feature-grid",
                for (name, usage) in features {
                    div {
                        key: "{name}",
                        class: "feature-card",
                        h3 { "{name}" }
                        dl {
                            dt { "Requests" }
                            dd { "{count(usage.requests)}" }
                            dt { "Tokens" }
                            dd { "{count(usage.tokens)}" }
                            dt { "Cost" }
                            dd { class: "cost", "{format_cost(usage.cost, 4)}" }
                            dt { "Users" }
                            dd { "{count(usage.unique_users)}" }
                        }
                    }
                }
            }
            div {
                class: "stat-grid compact totals",
                StatCard { label: "Total Requests", value: count(total.requests) }
                StatCard { label: "Total Tokens", value: count(total.tokens) }
                StatCard { label: "Total Cost", value: format_cost(total.cost, 4) }
                StatCard { label: "Total Users", value: count(total.unique_users) }
            }
        }
    }
}

#[component]
pub fn AiUsageView() -> Element {
    let console = use_console();
    let mut usage = use_signal(AiUsageController::new);
    let mut reload = use_signal(|| 0u64);

    let _loader = use_resource(move || async move {
        reload();
        let Some(backend) = console.backend() else {
            return;
        };
        let (ticket, range, sort) = usage.write().begin_load();
        let result = AiUsageController::fetch(&backend, range, sort).await;
        if let (Err(e), true) = (&result, usage.peek().is_current(ticket)) {
            console.load_failed("AI usage", e);
        }
        usage.write().finish_load(ticket, result);
    });

    let mut refresh = move || *reload.write() += 1;

    let state = usage.read();
    let range = state.range;
    let sort = state.sort;
    let sections = state.sections;
    let data = state.data.clone();
    let detail_user = state.detail.as_ref().map(|d| d.user.user_id.clone());
    drop(state);

    rsx! {
        h1 { class: "view-title", "AI Usage & Costs" }

        div {
            class: "filter-bar",
            label { class: "form-label", "From" }
            input {
                class: "form-input",
                r#type: "date",
                value: "{date_value(range.start)}",
                onchange: move |e| {
                    usage.write().set_start(&e.value());
                    refresh();
                },
            }
            label { class: "form-label", "To" }
            input {
                class: "form-input",
                r#type: "date",
                value: "{date_value(range.end)}",
                onchange: move |e| {
                    usage.write().set_end(&e.value());
                    refresh();
                },
            }
            if range.start.is_some() || range.end.is_some() {
                button {
                    class: "btn",
                    onclick: move |_| {
                        usage.write().clear_range();
                        refresh();
                    },
                    "All time"
                }
            }
        }

        if let Some(data) = data {
            SectionHeader {
                title: "Overall Statistics",
                open: sections.overview,
                on_toggle: move |_| usage.write().sections.toggle(Section::Overview),
            }
            if sections.overview {
                div {
                    class: "stat-grid",
                    StatCard { label: "Total Requests", value: count(data.stats.total_requests) }
                    StatCard { label: "Total Tokens", value: count(data.stats.total_tokens) }
                    StatCard { label: "Total Cost", value: format_cost(data.stats.total_cost_usd, 4) }
                    StatCard { label: "Active Users", value: count(data.stats.total_users) }
                    StatCard { label: "OpenAI Cost", value: format_cost(data.stats.openai_total_cost, 4) }
                    StatCard { label: "Gemini Cost", value: format_cost(data.stats.gemini_total_cost, 4) }
                    StatCard { label: "Weekly Insights", value: count(data.stats.weekly_insights_requests) }
                    StatCard { label: "Chat Requests", value: count(data.stats.chat_requests) }
                }
            }

            SectionHeader {
                title: "Budget Features Usage",
                open: sections.budget,
                on_toggle: move |_| usage.write().sections.toggle(Section::Budget),
            }
            if sections.budget {
                BreakdownPanel { breakdown: data.budgets.clone() }
            }

            SectionHeader {
                title: "Transaction Extraction Usage",
                open: sections.transaction,
                on_toggle: move |_| usage.write().sections.toggle(Section::Transaction),
            }
            if sections.transaction {
                BreakdownPanel { breakdown: data.transactions.clone() }
            }

            SectionHeader {
                title: "User AI Usage",
                open: sections.users,
                on_toggle: move |_| usage.write().sections.toggle(Section::Users),
            }
            if sections.users {
                div {
                    class: "filter-bar",
                    select {
                        class: "form-input",
                        value: "{sort.as_str()}",
                        onchange: move |e| {
                            if let Some(sort) = UsageSort::parse(&e.value()) {
                                usage.write().sort = sort;
                                refresh();
                            }
                        },
                        for choice in UsageSort::ALL {
                            option { key: "{choice.as_str()}", value: "{choice.as_str()}", "{choice.label()}" }
                        }
                    }
                }
                UserUsageTable {
                    rows: data.users.clone(),
                    on_select: move |user: UserUsage| usage.write().select_user(user),
                }
            }
        } else {
            Loading {}
        }

        if let Some(user_id) = detail_user {
            UsageDetailModal { key: "{user_id}", usage }
        }
    }
}

#[component]
fn UserUsageTable(rows: Vec<UserUsage>, on_select: EventHandler<UserUsage>) -> Element {
    if rows.is_empty() {
        return rsx! { EmptyState { message: "No AI usage recorded" } };
    }

    rsx! {
        div {
            class: "table-scroll",
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "User" }
                        th { "Requests" }
                        th { "Tokens (In/Out)" }
                        th { "Total Cost" }
                        th { "OpenAI" }
                        th { "Gemini" }
                        th { "Chat" }
                        th { "Insights" }
                        th { "" }
                    }
                }
                tbody {
                    for row in rows {
                        tr {
                            key: "{row.user_id}",
                            td {
                                div { class: "cell-primary", "{row.user_name}" }
                                div { class: "cell-secondary", "{row.user_email}" }
                            }
                            td { "{count(row.total_requests)}" }
                            td {
                                div { "{count(row.total_input_tokens)}" }
                                div { class: "cell-secondary", "{count(row.total_output_tokens)}" }
                            }
                            td { class: "cost", "{format_cost(row.total_cost_usd, 4)}" }
                            td { "{format_cost(row.openai_cost, 4)}" }
                            td { "{format_cost(row.gemini_cost, 4)}" }
                            td { "{row.chat_requests_count}" }
                            td {
                                div { "{row.weekly_insights_count}W" }
                                div { class: "cell-secondary", "{row.monthly_insights_count}M" }
                            }
                            td {
                                class: "cell-actions",
                                button {
                                    class: "btn btn-small",
                                    onclick: {
                                        let row = row.clone();
                                        move |_| on_select.call(row.clone())
                                    },
                                    "Detail"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Request log of the selected user, filtered by feature.
#[component]
fn UsageDetailModal(mut usage: Signal<AiUsageController>) -> Element {
    let console = use_console();
    let mut reload = use_signal(|| 0u64);

    let _records = use_resource(move || async move {
        reload();
        let Some(backend) = console.backend() else {
            return;
        };
        let Some((ticket, user_id, query)) = usage.write().detail.as_mut().map(|d| d.begin_load()) else {
            return;
        };
        let result = backend.user_usage_detail(&user_id, &query).await;
        let current = usage.peek().detail.as_ref().is_some_and(|d| d.user.user_id == user_id && d.is_current(ticket));
        if let (Err(e), true) = (&result, current) {
            console.load_failed("usage detail", e);
        }
        if let Some(detail) = usage.write().detail.as_mut().filter(|d| d.user.user_id == user_id) {
            detail.finish_load(ticket, result);
        }
    });

    let Some(detail) = usage.read().detail.clone() else {
        return rsx! {};
    };
    let filter = detail.feature.map(|f| f.as_str()).unwrap_or("");
    let records = detail.records.clone();

    rsx! {
        ModalOverlay {
            title: "{detail.user.user_name}",
            wide: true,
            on_close: move |_| usage.write().close_detail(),

            div { class: "view-muted", "{detail.user.user_email}" }

            div {
                class: "stat-grid compact",
                StatCard { label: "Requests", value: count(detail.user.total_requests) }
                StatCard { label: "Tokens", value: count(detail.user.total_tokens) }
                StatCard { label: "Total Cost", value: format_cost(detail.user.total_cost_usd, 4) }
            }

            div {
                class: "filter-bar",
                select {
                    class: "form-input",
                    value: "{filter}",
                    onchange: move |e| {
                        usage.write().set_feature(FeatureType::parse(&e.value()));
                        *reload.write() += 1;
                    },
                    option { value: "", "All features" }
                    for feature in FeatureType::FILTERABLE {
                        option { key: "{feature.as_str()}", value: "{feature.as_str()}", "{feature.label()}" }
                    }
                }
            }

            if records.is_empty() {
                EmptyState { message: "No requests recorded" }
            } else {
                div {
                    class: "table-scroll",
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "When" }
                                th { "Feature" }
                                th { "Provider" }
                                th { "Model" }
                                th { "Tokens (In/Out)" }
                                th { "Cost" }
                            }
                        }
                        tbody {
                            for record in records {
                                tr {
                                    key: "{record.id}",
                                    td { "{date_time(&record.created_at)}" }
                                    td { "{record.feature_type.label()}" }
                                    td { span { class: "badge", "{record.provider.label()}" } }
                                    td { "{record.model_name}" }
                                    td { "{count(record.input_tokens)} / {count(record.output_tokens)}" }
                                    td { class: "cost", "{format_cost(record.estimated_cost_usd, 6)}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
