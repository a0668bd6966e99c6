use crate::notification::{Notification, RejectReason};
use metrics::{counter, describe_counter};

/// Register the notification metrics
pub(super) fn register_metrics() {
    // Notifications rendered, labeled by the group status (firing or resolved)
    describe_counter!(
        "notifications_received_total",
        "Total number of notifications received and rendered"
    );

    // Individual alerts, labeled by the alert status
    describe_counter!(
        "alerts_received_total",
        "Total number of alerts contained in received notifications"
    );

    // Request bodies that could not be parsed, labeled by reason
    describe_counter!(
        "notifications_rejected_total",
        "Total number of rejected notifications"
    );
}

/// Record a rendered notification and the alerts it carries
pub fn record_notification(notification: &Notification) {
    counter!("notifications_received_total", "status" => notification.status.clone())
        .increment(1);

    for alert in &notification.alerts {
        let status = alert
            .status
            .clone()
            .unwrap_or_else(|| notification.status.clone());

        counter!("alerts_received_total", "status" => status).increment(1);
    }
}

/// Record a rejected request body
pub fn record_rejected(reason: RejectReason) {
    counter!("notifications_rejected_total", "reason" => reason.to_string()).increment(1);
}
