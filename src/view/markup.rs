use itertools::Itertools;

use super::{ActivityCard, ListStatus, ParticipantRow, RosterView};

impl RosterView {
    /// Markup of the activity list area.
    pub fn render_html(&self) -> String {
        let inner = match self.status() {
            ListStatus::Loading => format!("<p>{}</p>", escape(super::LOADING_TEXT)),
            ListStatus::Failed(message) => format!(r#"<p class="error">{}</p>"#, escape(message)),
            ListStatus::Ready => self.cards().iter().map(ActivityCard::to_html).join(""),
        };
        format!(r#"<div id="activities-list">{inner}</div>"#)
    }

    /// Markup of the activity selection control.
    pub fn render_select_html(&self) -> String {
        let options = self
            .options()
            .iter()
            .map(|o| {
                format!(
                    r#"<option value="{}">{}</option>"#,
                    escape(&o.value),
                    escape(&o.label)
                )
            })
            .join("");
        format!(r#"<select id="activity">{options}</select>"#)
    }
}

impl ActivityCard {
    pub fn to_html(&self) -> String {
        let rows = self.rows().iter().map(ParticipantRow::to_html).join("");
        format!(
            concat!(
                r#"<div class="activity-card" data-activity="{name}">"#,
                "<h4>{name}</h4>",
                "<p>{description}</p>",
                "<p>{schedule}</p>",
                r#"<p class="spots-remaining">{spots}</p>"#,
                r#"<div class="participants">"#,
                r#"<span class="participants-title">{title}</span>"#,
                r#"<ul class="participants-list">{rows}</ul>"#,
                "</div></div>"
            ),
            name = escape(self.name()),
            description = escape(self.description()),
            schedule = escape(&self.schedule_line()),
            spots = escape(self.spots_remaining()),
            title = escape(self.participants_title()),
            rows = rows,
        )
    }
}

impl ParticipantRow {
    pub fn to_html(&self) -> String {
        let label = escape(&self.remove_control().label());
        format!(
            concat!(
                r#"<li data-row="{id}"><span class="participant-email">{email}</span>"#,
                r#"<button class="participant-remove" type="button" title="{label}" aria-label="{label}">✖</button></li>"#
            ),
            id = self.id().0,
            email = escape(self.email()),
            label = label,
        )
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
