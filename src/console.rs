//! Opt-in capture of page console output.
//!
//! Enabled per scenario through [`SuiteConfig::capture_console`](crate::config::SuiteConfig)
//! instead of a listener attached to the whole browser. Handles that honor the
//! flag inject [`CAPTURE_SCRIPT`] after every `goto` and every wait for a load
//! state. A document reached by a click is only hooked once something waits
//! for it to load, and messages logged before that are not recorded.

use tracing::debug;

use crate::handle::PageHandle;
use crate::types::ConsoleMessage;

/// Wraps `console.*` and records messages in `window.__pagewright_console_logs`
pub const CAPTURE_SCRIPT: &str = r#"
    (function() {
        if (window.__pagewright_console_capture) return;
        window.__pagewright_console_capture = true;
        window.__pagewright_console_logs = [];

        function captureLog(level, args) {
            const message = Array.from(args).map(arg => {
                if (typeof arg === 'object') {
                    try {
                        return JSON.stringify(arg);
                    } catch (e) {
                        return String(arg);
                    }
                }
                return String(arg);
            }).join(' ');

            window.__pagewright_console_logs.push({
                level: level,
                message: message,
                timestamp: new Date().toISOString()
            });

            if (window.__pagewright_console_logs.length > 1000) {
                window.__pagewright_console_logs.shift();
            }
        }

        ['log', 'info', 'warn', 'error'].forEach(function(level) {
            const original = console[level];
            console[level] = function(...args) {
                captureLog(level, args);
                original.apply(console, args);
            };
        });

        window.addEventListener('error', function(event) {
            captureLog('error', [`Uncaught ${event.error || event.message} at ${event.filename}:${event.lineno}:${event.colno}`]);
        });

        window.addEventListener('unhandledrejection', function(event) {
            captureLog('error', [`Unhandled Promise Rejection: ${event.reason}`]);
        });
    })();
"#;

const READ_SCRIPT: &str = "return window.__pagewright_console_logs || [];";

/// Everything captured since the last navigation. Empty when capture is off
/// or the page cannot be scripted.
pub async fn messages<H: PageHandle + ?Sized>(handle: &H) -> Vec<ConsoleMessage> {
    match handle.evaluate(READ_SCRIPT, vec![]).await {
        Ok(value) => serde_json::from_value(value).unwrap_or_default(),
        Err(e) => {
            debug!("Could not read console messages: {}", e);
            Vec::new()
        }
    }
}

/// Only the `error` level messages
pub async fn errors<H: PageHandle + ?Sized>(handle: &H) -> Vec<ConsoleMessage> {
    messages(handle)
        .await
        .into_iter()
        .filter(|m| m.level == "error")
        .collect()
}

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;
