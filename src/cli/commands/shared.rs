use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Local};
use tracing::debug;

use crate::adapters::api::http_client::ApiClient;
use crate::adapters::sources::json_file_source::JsonFileSource;
use crate::cli::{Cli, context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::event::EventRecord;
use crate::core::models::member::CurrentUser;
use crate::core::models::filter_state::FilterState;
use crate::core::models::window::TimeWindow;
use crate::core::traits::event_source::EventSource;

/// Global flags every command shares, plus the config they resolve
/// against.
pub struct Globals {
    pub events: Option<PathBuf>,
    pub api_url: Option<String>,
    pub session: Option<String>,
    pub now: Option<String>,
    pub window: Option<String>,
    pub projects: Vec<String>,
}

impl Globals {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            events: cli.events.as_ref().map(PathBuf::from),
            api_url: cli.api_url.clone().filter(|u| !u.trim().is_empty()),
            session: cli.session.clone(),
            now: cli.now.clone(),
            window: cli.window.clone(),
            projects: cli.project.clone(),
        }
    }

    /// Config from the config directory, or defaults when there is none.
    pub fn config(&self) -> Result<AppConfig> {
        AppConfig::load_or_default(context::config_dir())
    }

    /// The reference instant for this run, captured once.
    pub fn now(&self) -> Result<DateTime<FixedOffset>> {
        match &self.now {
            Some(raw) => {
                DateTime::parse_from_rfc3339(raw.trim()).map_err(|_| IssueLensError::InvalidTimestamp {
                    value: raw.clone(),
                })
            }
            None => Ok(Local::now().fixed_offset()),
        }
    }

    /// `--window` or the configured default, plus the `--project` set.
    pub fn filter(&self, config: &AppConfig) -> Result<FilterState> {
        let window: TimeWindow = match &self.window {
            Some(code) => code.parse()?,
            None => config.default_window()?,
        };
        Ok(FilterState::new(window, self.projects.iter().map(String::as_str)))
    }

    /// Backend client; `--api-url` wins over `[api].base_url`.
    pub fn api_client(&self, config: &AppConfig) -> Result<ApiClient> {
        let base_url = self
            .api_url
            .as_deref()
            .or(config.api_base_url())
            .ok_or(IssueLensError::NoEventSource)?;
        Ok(ApiClient::from_config(
            &config.api,
            Some(base_url),
            self.session.as_deref(),
        ))
    }

    /// Event source for this run: `--events` wins, then the backend.
    pub fn source(&self, config: &AppConfig) -> Result<Box<dyn EventSource>> {
        if let Some(path) = &self.events {
            return Ok(Box::new(JsonFileSource::new(path)));
        }
        Ok(Box::new(self.api_client(config)?))
    }

    /// Load the full, unfiltered event collection.
    pub fn fetch_events(&self, config: &AppConfig) -> Result<Vec<EventRecord>> {
        let source = self.source(config)?;
        debug!(source = %source.describe(), "fetching events");

        if self.events.is_some() {
            return source.fetch_events();
        }

        let sp = output::spinner(&format!("Fetching {}...", source.describe()));
        match source.fetch_events() {
            Ok(events) => {
                sp.finish_and_clear();
                debug!(count = events.len(), "fetched events");
                Ok(events)
            }
            Err(e) => {
                output::abandon_spinner(sp);
                Err(e)
            }
        }
    }
}

/// Resolve the session's account and refuse unless its role may
/// perform `action`.
pub fn require_manager(client: &ApiClient, action: &str) -> Result<CurrentUser> {
    let sp = output::spinner("Checking your role...");
    let me = match client.current_user() {
        Ok(me) => me,
        Err(e) => {
            output::abandon_spinner(sp);
            return Err(e);
        }
    };
    output::finish_spinner(sp, &format!("Signed in as {} ({})", me.label(), me.role()));
    debug!(role = %me.role(), action, "checking role");
    me.authorize(action)?;
    Ok(me)
}

/// Keep the last `n` items, preserving order.
pub fn take_last<T>(items: Vec<T>, n: Option<usize>) -> Vec<T> {
    match n {
        Some(n) if n < items.len() => {
            let skip = items.len() - n;
            items.into_iter().skip(skip).collect()
        }
        _ => items,
    }
}

/// Shorten `s` to at most `max_len` characters, marking the cut with `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let limit = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(limit).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals() -> Globals {
        Globals {
            events: None,
            api_url: None,
            session: None,
            now: None,
            window: None,
            projects: vec![],
        }
    }

    #[test]
    fn now_flag_keeps_its_offset() {
        let g = Globals {
            now: Some("2024-01-05T12:00:00+03:00".into()),
            ..globals()
        };
        let now = g.now().unwrap();
        assert_eq!(now.offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn bad_now_flag_is_rejected() {
        let g = Globals {
            now: Some("yesterday".into()),
            ..globals()
        };
        assert!(matches!(g.now(), Err(IssueLensError::InvalidTimestamp { .. })));
    }

    #[test]
    fn window_flag_overrides_config() {
        let g = Globals {
            window: Some("all".into()),
            projects: vec!["p1".into(), " ".into()],
            ..globals()
        };
        let filter = g.filter(&AppConfig::default()).unwrap();
        assert_eq!(filter.window, TimeWindow::All);
        assert_eq!(filter.projects.len(), 1);
    }

    #[test]
    fn no_source_configured() {
        let err = globals().source(&AppConfig::default()).err().unwrap();
        assert!(matches!(err, IssueLensError::NoEventSource));
    }

    #[test]
    fn take_last_keeps_tail_in_order() {
        assert_eq!(take_last(vec![1, 2, 3, 4], Some(2)), vec![3, 4]);
        assert_eq!(take_last(vec![1, 2], Some(5)), vec![1, 2]);
        assert_eq!(take_last(vec![1, 2], None), vec![1, 2]);
    }

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate("hello world!", 8), "hello...");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_unicode_safe() {
        assert_eq!(truncate("contraseña", 8), "contr...");
    }
}
