// SPDX-License-Identifier: GPL-3.0-only

//! Desktop notifications via the `org.freedesktop.Notifications` D-Bus API
//!
//! Used for the save-to-library confirmation. Fire-and-forget: a missing
//! notification daemon must never break the review flow, so failures are
//! logged and swallowed.

use std::collections::HashMap;
use tracing::{debug, warn};
use zbus::zvariant::Value;

/// Default notification timeout in milliseconds
const EXPIRE_TIMEOUT_MS: i32 = 4000;

/// Show a desktop notification with the given summary and body
pub async fn send(summary: &str, body: &str) {
    if let Err(error) = send_inner(summary, body).await {
        warn!(%error, "Failed to send desktop notification");
    }
}

async fn send_inner(summary: &str, body: &str) -> zbus::Result<()> {
    let connection = zbus::Connection::session().await?;

    let proxy = zbus::Proxy::new(
        &connection,
        "org.freedesktop.Notifications",
        "/org/freedesktop/Notifications",
        "org.freedesktop.Notifications",
    )
    .await?;

    // Notify(app_name, replaces_id, app_icon, summary, body,
    //        actions, hints, expire_timeout) -> notification id
    let id: u32 = proxy
        .call(
            "Notify",
            &(
                "obscura",
                0u32,
                "camera-photo-symbolic",
                summary,
                body,
                Vec::<String>::new(),
                HashMap::<&str, Value>::new(),
                EXPIRE_TIMEOUT_MS,
            ),
        )
        .await?;

    debug!(id, summary, "Desktop notification sent");
    Ok(())
}
