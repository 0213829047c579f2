//! Packet capture on the netflow container. Unlike the original, the
//! filename tcpdump is told to use is recorded in `AppState` the moment
//! the capture starts, so stopping it never has to list the container's
//! root directory and guess which `.pcap` is the one in progress.

use crate::error::{ApiError, ApiResult};
use crate::state::{ActiveCapture, AppState};
use std::path::PathBuf;
use uuid::Uuid;

pub async fn start(state: &AppState) -> ApiResult<(String, String)> {
    {
        let guard = state.capture.lock();
        if guard.is_some() {
            return Err(ApiError::CaptureAlreadyInProgress);
        }
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("{timestamp}.pcap");
    let container = state.netflow_container();
    let capture_id = Uuid::new_v4().to_string();

    let cmd = format!("tcpdump -i any -w {filename} &");
    state.gateway.exec(&container, &cmd).await?;

    *state.capture.lock() = Some(ActiveCapture {
        id: capture_id.clone(),
        filename: filename.clone(),
        container,
    });

    Ok((capture_id, filename))
}

pub async fn stop(state: &AppState) -> ApiResult<(String, PathBuf)> {
    let active = state
        .capture
        .lock()
        .take()
        .ok_or(ApiError::NoCaptureInProgress)?;

    state
        .gateway
        .exec(&active.container, "pkill -SIGINT tcpdump")
        .await?;

    let local_path = state.logs_dir.join(&active.filename);
    let container_path = format!("/{}", active.filename);
    state
        .gateway
        .copy_out(&active.container, &container_path, &local_path)
        .await?;

    Ok((active.id, local_path))
}
