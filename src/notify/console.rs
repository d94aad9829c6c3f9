//! Colored console output for prepared notifications.

use super::dispatch::SweepReport;
use crate::registry::AppInfo;
use crate::types::{Notification, PrepareError};
use colored::Colorize;

/// Console output handler with colors and formatting.
pub struct ConsoleOutput {
    verbose: bool,
    json_mode: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(verbose: bool, json_mode: bool) -> Self {
        Self { verbose, json_mode }
    }

    /// Print info message.
    pub fn print_info(&self, message: &str) {
        if self.json_mode {
            return;
        }

        println!("{} {}", "[*]".bright_blue(), message);
    }

    /// Print registered notifiers and installed apps (only in verbose mode).
    pub fn print_setup(&self, notifiers: &[(String, String)], apps: &[AppInfo]) {
        if self.json_mode || !self.verbose {
            return;
        }

        println!("{}", "=== Notifiers ===".bright_cyan());
        for (id, name) in notifiers {
            println!("  {} ({})", name.bright_white(), id.dimmed());
        }
        println!("{}", "=== Installed apps ===".bright_cyan());
        for app in apps {
            println!(
                "  {} {} ({})",
                app.name.bright_white(),
                app.version,
                app.id.dimmed()
            );
        }
        println!();
    }

    /// Print a prepared notification.
    pub fn print_notification(&self, notification: &Notification) {
        if self.json_mode {
            if let Ok(json) = serde_json::to_string_pretty(notification) {
                println!("{}", json);
            }
            return;
        }

        println!();
        println!(
            "{} {}",
            "===".bright_cyan(),
            notification
                .parsed_subject
                .as_deref()
                .unwrap_or_default()
                .bright_white()
                .bold()
        );
        println!(
            "    |-- Object: {}/{}",
            notification.object_type, notification.object_id
        );
        println!("    |-- User:   {}", notification.user);
        if let Some(rich) = &notification.rich_subject {
            println!("    |-- Rich:   {}", rich);
            for (name, param) in &notification.rich_subject_parameters {
                println!(
                    "    |     {{{}}} = {} {} ({})",
                    name,
                    param.kind,
                    param.name.bold(),
                    param.id
                );
            }
        }
        println!(
            "    +-- Icon:   {}",
            notification.icon.as_deref().unwrap_or_default().dimmed()
        );
    }

    /// Print why a notification was not shown.
    pub fn print_rejection(&self, notification: &Notification, error: &PrepareError) {
        if self.json_mode {
            let value = serde_json::json!({
                "objectType": notification.object_type,
                "objectId": notification.object_id,
                "suppressed": error.is_suppressed(),
                "error": error.to_string(),
            });
            println!("{}", value);
            return;
        }

        let label = if error.is_suppressed() {
            "SUPPRESSED".yellow().bold()
        } else {
            "UNSUPPORTED".red().bold()
        };
        println!("{} [{}] {}", "[!]".yellow(), label, error);
    }

    /// Print sweep results.
    pub fn print_report(&self, report: &SweepReport) {
        if self.json_mode {
            if let Ok(json) = serde_json::to_string_pretty(report) {
                println!("{}", json);
            }
            return;
        }

        for notification in &report.prepared {
            self.print_notification(notification);
        }

        if self.verbose {
            for notification in &report.suppressed {
                println!(
                    "{} {}/{} already installed",
                    "[-]".dimmed(),
                    notification.object_type,
                    notification.object_id
                );
            }
            for notification in &report.unclaimed {
                println!(
                    "{} no notifier for app {}",
                    "[?]".dimmed(),
                    notification.app
                );
            }
        }

        println!();
        println!("{}", "=== Sweep Summary ===".bright_cyan());
        println!("  Pending:    {}", report.total());
        println!(
            "  Prepared:   {}",
            report.prepared.len().to_string().green()
        );
        println!("  Suppressed: {}", report.suppressed.len());
        if report.unclaimed.is_empty() {
            println!("  Unclaimed:  0");
        } else {
            println!(
                "  Unclaimed:  {}",
                report.unclaimed.len().to_string().yellow()
            );
        }
        println!();
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false)
    }
}
