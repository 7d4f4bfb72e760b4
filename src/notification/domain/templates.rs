//! Message templates for lifecycle notifications.

use super::{LifecycleNotice, NotificationDomainError, NotificationType};
use minijinja::Environment;

const fn template_for(kind: NotificationType) -> &'static str {
    match kind {
        NotificationType::TaskAssigned => "New task assigned: {{ task_title }}",
        NotificationType::TaskReviewed => {
            "Your submission for {{ task_title }} was {{ verdict }}\
             {% if remark %}: {{ remark }}{% endif %}"
        }
        NotificationType::WarningIssued => {
            "You received a {{ level }} warning: {{ title }}"
        }
        NotificationType::CourseCreated => "New course available: {{ course_title }}",
        NotificationType::SystemAnnouncement => "{{ message }}",
    }
}

/// Renders the message for a lifecycle notice.
///
/// # Errors
///
/// Returns [`NotificationDomainError::TemplateRender`] when rendering fails
/// and [`NotificationDomainError::EmptyMessage`] when it produces only
/// whitespace.
pub fn render_message(notice: &LifecycleNotice) -> Result<String, NotificationDomainError> {
    let environment = Environment::new();
    let rendered = environment
        .render_str(template_for(notice.kind()), notice.context())
        .map_err(|error| NotificationDomainError::TemplateRender {
            kind: notice.kind(),
            reason: error.to_string(),
        })?;
    if rendered.trim().is_empty() {
        return Err(NotificationDomainError::EmptyMessage);
    }
    Ok(rendered)
}
