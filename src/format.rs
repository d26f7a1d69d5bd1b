use std::time::Duration;

/// Render an elapsed duration as `mm:ss`, or `hh:mm:ss` from one hour up.
///
/// Sub-second precision is dropped. Hours are not wrapped at 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours >= 1 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
