//! Region renderers for provider cards, dapp cards and the incident list

use super::markup::Markup;
use super::page::Region;
use crate::api::types::{DappEntry, Incident, RpcProvider, StatusResponse};
use crate::consts::dashboard_consts::{CRITICAL_SEVERITY, NO_OPEN_INCIDENTS, PLACEHOLDER_DASH};

/// `"<ms> ms"`, or the dash placeholder when the latency is unknown.
pub fn format_latency(latency_ms: Option<f64>) -> String {
    match latency_ms {
        Some(ms) => format!("{} ms", ms),
        None => PLACEHOLDER_DASH.to_string(),
    }
}

/// Replace `container` with one card per RPC provider, in input order.
///
/// Nothing happens when the container, the response or its provider list is absent.
pub fn render_rpc(container: Option<&mut Region>, data: Option<&StatusResponse>) {
    let (Some(container), Some(providers)) =
        (container, data.and_then(|d| d.rpc_providers.as_deref()))
    else {
        return;
    };
    container.set_markup(providers.iter().map(rpc_card).collect());
}

/// Same as [`render_rpc`] for dapps, without the error line.
pub fn render_dapps(container: Option<&mut Region>, data: Option<&StatusResponse>) {
    let (Some(container), Some(dapps)) = (container, data.and_then(|d| d.dapps.as_deref())) else {
        return;
    };
    container.set_markup(dapps.iter().map(dapp_card).collect());
}

/// Replace `list` with one item per incident, or a single placeholder item
/// when there are none.
pub fn render_incidents(list: Option<&mut Region>, data: Option<&[Incident]>) {
    let Some(list) = list else {
        return;
    };

    let markup: Markup = match data {
        Some(incidents) if !incidents.is_empty() => incidents.iter().map(incident_item).collect(),
        _ => Markup::element("li", Some("empty"), Markup::text(NO_OPEN_INCIDENTS)),
    };
    list.set_markup(markup);
}

fn rpc_card(provider: &RpcProvider) -> Markup {
    let mut body = card_body(&provider.name, provider.latency_ms, provider.url.as_deref());
    if let Some(error) = non_empty(provider.last_error.as_deref()) {
        body.push(Markup::element("div", Some("error"), Markup::text(error)));
    }
    Markup::element("div", Some(card_class(provider.healthy)), body)
}

fn dapp_card(dapp: &DappEntry) -> Markup {
    let body = card_body(&dapp.name, dapp.latency_ms, dapp.url.as_deref());
    Markup::element("div", Some(card_class(dapp.healthy)), body)
}

fn card_body(name: &str, latency_ms: Option<f64>, url: Option<&str>) -> Markup {
    let mut body = Markup::element("div", Some("name"), Markup::text(name));
    body.push(Markup::element(
        "div",
        Some("latency"),
        Markup::text(format_latency(latency_ms).as_str()),
    ));
    if let Some(url) = non_empty(url) {
        body.push(Markup::element("div", Some("url"), Markup::text(url)));
    }
    body
}

fn card_class(healthy: bool) -> &'static str {
    if healthy { "card healthy" } else { "card unhealthy" }
}

fn incident_item(incident: &Incident) -> Markup {
    let class = (incident.severity == CRITICAL_SEVERITY).then_some("crit");

    let mut item = Markup::element("strong", None, Markup::text(incident.entity_name.as_str()));
    item.push_text(" (")
        .push_text(incident.severity.as_str())
        .push_text(") ")
        .push_text(incident.summary.as_str())
        .push_text(" ");
    item.push(Markup::element(
        "span",
        Some("muted"),
        Markup::text(incident.started_at.as_str()),
    ));
    Markup::element("li", class, item)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
