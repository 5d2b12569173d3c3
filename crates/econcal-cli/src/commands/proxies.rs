use econcal_core::ProxyId;
use serde_json::{json, Value};

use super::CommandResult;

pub fn run() -> CommandResult {
    let proxies: Vec<Value> = ProxyId::ALL
        .iter()
        .enumerate()
        .map(|(index, proxy)| {
            json!({
                "position": index + 1,
                "id": proxy.as_str(),
                "base_url": proxy.base_url(),
            })
        })
        .collect();

    CommandResult::ok(json!({ "proxies": proxies }), ProxyId::ALL.to_vec())
}
