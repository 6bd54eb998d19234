use chrono::{DateTime, FixedOffset};

use crate::entities::CountdownStatus;

use super::escape;

const SCRIPT: &str = r#"
<script>
(function () {
  const countdownElement = document.getElementById('countdown');
  const livestreamDiv = document.getElementById('livestream');
  const countdownContainer = document.getElementById('countdown-container');
  const eventDate = Number(countdownContainer.dataset.eventStart);

  if (livestreamDiv.style.display === 'block') {
    return;
  }

  const interval = setInterval(function () {
    const distance = eventDate - Date.now();

    if (distance <= 0) {
      clearInterval(interval);
      countdownContainer.style.display = 'none';
      livestreamDiv.style.display = 'block';
      return;
    }

    const days = Math.floor(distance / (1000 * 60 * 60 * 24));
    const hours = Math.floor((distance % (1000 * 60 * 60 * 24)) / (1000 * 60 * 60));
    const minutes = Math.floor((distance % (1000 * 60 * 60)) / (1000 * 60));
    const seconds = Math.floor((distance % (1000 * 60)) / 1000);
    countdownElement.textContent = '⏳ Live in ' + days + 'd ' + hours + 'h ' + minutes + 'm ' + seconds + 's';
  }, 1000);
})();
</script>
"#;

pub fn render(
    couple: &str,
    event_start: DateTime<FixedOffset>,
    livestream_url: &str,
    status: CountdownStatus,
) -> String {
    let (countdown_display, livestream_display) = match status {
        CountdownStatus::Live => ("none", "block"),
        CountdownStatus::Pending { .. } => ("block", "none"),
    };

    format!(
        r#"<h1 style="text-align: center;">🎥 {couple}'s Wedding – Live Stream</h1>
<p>Join us live at {when}! The stream will begin shortly...</p>
<div id="countdown-container" data-event-start="{start_ms}" style="text-align:center; display:{countdown_display};">
  <h2 id="countdown" style="color:#d63384;">{label}</h2>
</div>
<div id="livestream" style="display:{livestream_display}; text-align:center;">
  <iframe src="{url}" width="100%" height="720" style="border:none;overflow:hidden" scrolling="no" frameborder="0"
    allowfullscreen="true" allow="autoplay; clipboard-write; encrypted-media; picture-in-picture; web-share">
  </iframe>
</div>
{script}"#,
        couple = escape(couple),
        when = event_start.format("%-I:%M %p on %B %-d, %Y"),
        start_ms = event_start.timestamp_millis(),
        countdown_display = countdown_display,
        livestream_display = livestream_display,
        label = escape(&status.label()),
        url = escape(livestream_url),
        script = SCRIPT,
    )
}

#[cfg(test)]
fn event_start() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2025-07-11T13:00:00+01:00").unwrap()
}

#[test]
fn pending_shows_countdown() {
    let status = CountdownStatus::Pending {
        days: 2,
        hours: 0,
        minutes: 0,
        seconds: 5,
    };
    let html = render("Victor & Joy", event_start(), "https://example.com/live", status);

    assert!(html.contains("Victor &amp; Joy's Wedding"));
    assert!(html.contains("1:00 PM on July 11, 2025"));
    assert!(html.contains(r#"id="livestream" style="display:none;"#));
    assert!(html.contains("⏳ Live in 2d 0h 0m 5s"));
    assert!(html.contains(&event_start().timestamp_millis().to_string()));
}

#[test]
fn live_shows_player() {
    let html = render(
        "Victor & Joy",
        event_start(),
        "https://example.com/live?a=1&b=2",
        CountdownStatus::Live,
    );

    assert!(html.contains(r#"id="livestream" style="display:block;"#));
    assert!(html.contains("https://example.com/live?a=1&amp;b=2"));
}
