//! Thin HTTP client against the control plane. Every call goes through
//! `perform`, which logs the endpoint, payload and outcome via the
//! `RequestLogger` regardless of success or failure, mirroring the
//! blanket `perform_request` wrapper the original orchestrator used.

use crate::error::{ChaosError, ChaosResult};
use crate::logger::RequestLogger;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    logger: Arc<RequestLogger>,
}

#[derive(Debug, Deserialize)]
pub struct RoutersBody {
    pub routers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LinkEntryBody {
    pub src: String,
    pub dst: String,
}

#[derive(Debug, Deserialize)]
pub struct LinksBody {
    pub links: Vec<LinkEntryBody>,
}

#[derive(Debug, Deserialize)]
pub struct IpsBody {
    pub ips: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotBody {
    pub snapshot_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ShapingBody {
    pub loss: String,
    pub delay: String,
    pub bandwidth: String,
    pub burst: String,
    pub buffer: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, logger: Arc<RequestLogger>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            logger,
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, producer: &str, endpoint: &str) -> ChaosResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let result = self.http.get(&url).send().await;
        self.finish(producer, endpoint, &Value::Null, result).await
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        producer: &str,
        endpoint: &str,
        body: Value,
    ) -> ChaosResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let result = self.http.post(&url).json(&body).send().await;
        self.finish(producer, endpoint, &body, result).await
    }

    async fn finish<T: for<'de> Deserialize<'de>>(
        &self,
        producer: &str,
        endpoint: &str,
        data: &Value,
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> ChaosResult<T> {
        match result {
            Ok(response) => {
                let status = response.status();
                self.logger.log(producer, endpoint, data, Some(status.as_u16()), None);
                if !status.is_success() {
                    let detail = response.text().await.unwrap_or_default();
                    return Err(ChaosError::Transient { status: status.as_u16(), detail });
                }
                Ok(response.json::<T>().await?)
            }
            Err(e) => {
                self.logger.log(producer, endpoint, data, None, Some(&e.to_string()));
                Err(ChaosError::Http(e))
            }
        }
    }

    pub async fn available_routers(&self) -> ChaosResult<Vec<String>> {
        let body: RoutersBody = self.get("startup", "/available_routers").await?;
        Ok(body.routers)
    }

    pub async fn links(&self) -> ChaosResult<Vec<(String, String)>> {
        let body: LinksBody = self.get("startup", "/links").await?;
        Ok(body.links.into_iter().map(|l| (l.src, l.dst)).collect())
    }

    pub async fn router_ips(&self) -> ChaosResult<HashMap<String, String>> {
        let body: IpsBody = self.get("startup", "/router_ips").await?;
        Ok(body.ips)
    }

    pub async fn host_ips(&self) -> ChaosResult<HashMap<String, String>> {
        let body: IpsBody = self.get("startup", "/host_ips").await?;
        Ok(body.ips)
    }

    pub async fn take_snapshot(&self, producer: &str) -> ChaosResult<String> {
        let body: SnapshotBody = self.post(producer, "/take_snapshot", json!({})).await?;
        Ok(body.snapshot_id)
    }

    pub async fn apply_snapshot(&self, producer: &str, snapshot_id: &str) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/apply_snapshot", json!({ "snapshot_id": snapshot_id }))
            .await?;
        Ok(())
    }

    pub async fn link_state(&self, producer: &str, src: &str, dst: &str) -> ChaosResult<ShapingBody> {
        let url = format!("/link_state?src={src}&dst={dst}");
        self.get(producer, &url).await
    }

    pub async fn add_loss(&self, producer: &str, src: &str, dst: &str, loss_rate: f64) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/add_loss", json!({ "src": src, "dst": dst, "loss_rate": loss_rate }))
            .await?;
        Ok(())
    }

    pub async fn add_delay(&self, producer: &str, src: &str, dst: &str, delay: f64) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/add_delay", json!({ "src": src, "dst": dst, "delay": delay }))
            .await?;
        Ok(())
    }

    pub async fn reset_link(&self, producer: &str, src: &str, dst: &str) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/reset_link", json!({ "src": src, "dst": dst }))
            .await?;
        Ok(())
    }

    pub async fn reset_bandwidth(&self, producer: &str, src: &str, dst: &str) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/reset_bandwidth", json!({ "src": src, "dst": dst }))
            .await?;
        Ok(())
    }

    pub async fn reset_buffer(&self, producer: &str, src: &str, dst: &str) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/reset_buffer", json!({ "src": src, "dst": dst }))
            .await?;
        Ok(())
    }

    pub async fn reset_burst(&self, producer: &str, src: &str, dst: &str) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/reset_burst", json!({ "src": src, "dst": dst }))
            .await?;
        Ok(())
    }

    pub async fn set_bandwidth(&self, producer: &str, src: &str, dst: &str, bandwidth: &str) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/set_bandwidth", json!({ "src": src, "dst": dst, "bandwidth": bandwidth }))
            .await?;
        Ok(())
    }

    pub async fn change_ospf_cost(&self, producer: &str, src: &str, dst: &str, cost: u32) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/change_ospf_cost", json!({ "src": src, "dst": dst, "cost": cost }))
            .await?;
        Ok(())
    }

    pub async fn add_static_route(&self, producer: &str, node: &str, destination: &str, next_hop: &str) -> ChaosResult<()> {
        let _: Value = self
            .post(
                producer,
                "/add_static_route",
                json!({ "node": node, "destination": destination, "next_hop": next_hop }),
            )
            .await?;
        Ok(())
    }

    pub async fn remove_static_route(&self, producer: &str, node: &str, destination: &str, next_hop: &str) -> ChaosResult<()> {
        let _: Value = self
            .post(
                producer,
                "/remove_static_route",
                json!({ "node": node, "destination": destination, "next_hop": next_hop }),
            )
            .await?;
        Ok(())
    }

    pub async fn disconnect_router(&self, producer: &str, node: &str) -> ChaosResult<()> {
        let _: Value = self.post(producer, "/disconnect_router", json!({ "node": node })).await?;
        Ok(())
    }

    pub async fn connect_router(&self, producer: &str, node: &str) -> ChaosResult<()> {
        let _: Value = self.post(producer, "/connect_router", json!({ "node": node })).await?;
        Ok(())
    }

    pub async fn execute(&self, producer: &str, node: &str, router: bool, cmd: &str) -> ChaosResult<()> {
        let _: Value = self
            .post(producer, "/execute", json!({ "node": node, "router": router, "cmd": cmd }))
            .await?;
        Ok(())
    }
}
