use crate::{notification::Notification, render::Renderer};
use serde_json::{Map, Value};
use std::fmt;

/// Multi-line, human-readable report of one notification
pub struct Report<'a> {
    notification: &'a Notification,
    renderer: &'a Renderer,
}

impl<'a> Report<'a> {
    pub fn new(notification: &'a Notification, renderer: &'a Renderer) -> Self {
        Self {
            notification,
            renderer,
        }
    }

    fn write_section(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        entries: &Map<String, Value>,
    ) -> fmt::Result {
        write!(f, "\n\t{title}:")?;

        for (key, value) in entries {
            write!(f, "\n\t\t{}={}", key, self.renderer.render(value))?;
        }

        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notification = self.notification;

        write!(
            f,
            "Received {} {} alerts:",
            notification.alerts.len(),
            notification.status
        )?;

        self.write_section(f, "Grouping labels", &notification.group_labels)?;
        self.write_section(f, "Common labels", &notification.common_labels)?;
        self.write_section(f, "Common annotations", &notification.common_annotations)?;

        write!(f, "\n\t\tAlert details:")?;

        for (idx, alert) in notification.alerts.iter().enumerate() {
            write!(f, "\n\t\t\tAlert {idx}:")?;
            write!(
                f,
                "\n\t\t\t\tLabels: {}",
                self.renderer.render_map(&alert.labels)
            )?;
            write!(
                f,
                "\n\t\t\t\tAnnotations: {}",
                self.renderer.render_map(&alert.annotations)
            )?;
        }

        Ok(())
    }
}
