//! Network activity captured during a behavioral task.

use crate::json::record;

record! {
    pub struct NetworkReport {
        flows: Vec<NetworkFlow> = "flows",
        requests: Vec<NetworkRequest> = "requests",
    }
}

impl NetworkReport {
    /// Distinct domains contacted across all flows, in first-seen order.
    pub fn domains(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for flow in &self.flows {
            if !flow.domain.is_empty() && !seen.contains(&flow.domain.as_str()) {
                seen.push(flow.domain.as_str());
            }
        }
        seen
    }
}

record! {
    /// A single connection.
    pub struct NetworkFlow {
        id: i64 = "id",
        source: String = "src",
        dest: String = "dst",
        proto: String = "proto",
        pid: i64 = "pid",
        procid: i64 = "procid",
        first_seen: i64 = "first_seen",
        last_seen: i64 = "last_seen",
        rx_bytes: i64 = "rx_bytes",
        rx_packets: i64 = "rx_packets",
        tx_bytes: i64 = "tx_bytes",
        tx_packets: i64 = "tx_packets",
        domain: String = "domain",
        ja3: String = "tls_ja3",
        sni: String = "sni",
        country: String = "country",
        as_num: String = "as_num",
        as_org: String = "as_org",
    }
}

record! {
    /// An application-level request carried by a flow.
    pub struct NetworkRequest {
        flow: i64 = "flow",
        at: i64 = "at",
        dns_request: DomainRequest = "dns_request",
        dns_response: DomainResponse = "dns_response",
        http_request: WebRequest = "http_request",
        http_response: WebResponse = "http_response",
    }
}

record! {
    pub struct DomainRequest {
        domains: Vec<String> = "domains",
    }
}

record! {
    pub struct DomainResponse {
        domains: Vec<String> = "domains",
        ip: Vec<String> = "ip",
    }
}

record! {
    pub struct WebRequest {
        method: String = "method",
        url: String = "url",
        headers: Vec<String> = "headers",
    }
}

record! {
    pub struct WebResponse {
        status: String = "status",
        headers: Vec<String> = "headers",
    }
}
