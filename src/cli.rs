use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use conf_schedule::{
    app::ScheduleScreen,
    storage::config::Config,
    sync::sync_engine::SyncEngine,
    ui::theme::Theme,
};

pub const USAGE: &str = "Usage: conf-schedule [--agenda | --json] [--config <path>]";

pub fn help_text() -> String {
    format!(
        "{USAGE}\n\n  --agenda         Print the schedule as text\n  --json           Print the schedule as JSON\n  --config <path>  Use a config file other than the default\n\nThemes (ui.theme): {}",
        Theme::available_themes().join(", ")
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Tui,
    Agenda,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub config_path: Option<PathBuf>,
}

pub enum CliRequest {
    Run(CliOptions),
    Help,
}

pub fn parse_cli_mode() -> Result<CliRequest, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliRequest, String> {
    let mut mode = CliMode::Tui;
    let mut config_path = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" => mode = set_mode(mode, CliMode::Agenda)?,
            "--json" => mode = set_mode(mode, CliMode::Json)?,
            "--config" => {
                let path = args
                    .next()
                    .filter(|p| !p.starts_with("--"))
                    .ok_or_else(|| "--config requires a path".to_string())?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(CliRequest::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliRequest::Run(CliOptions { mode, config_path }))
}

fn set_mode(current: CliMode, requested: CliMode) -> Result<CliMode, String> {
    if current != CliMode::Tui && current != requested {
        return Err("--agenda and --json cannot be combined".to_string());
    }
    Ok(requested)
}

async fn fetch_schedule(config: &Config) -> Result<ScheduleScreen, io::Error> {
    let engine = SyncEngine::new(config)
        .map_err(|e| io::Error::other(e.to_string()))?;
    let mut screen = ScheduleScreen::new(config.ui.header.clone());
    engine.run_fetch_cycle(&mut screen).await;
    Ok(screen)
}

pub async fn run_agenda_mode(config: &Config) -> Result<(), io::Error> {
    let screen = fetch_schedule(config).await?;
    let agenda = format_agenda_text(&screen, config.ui.show_fetch_errors);
    display_with_pager(&agenda)
}

pub async fn run_json_mode(config: &Config) -> Result<(), io::Error> {
    let screen = fetch_schedule(config).await?;
    let json = serde_json::to_string_pretty(screen.events())
        .map_err(|e| io::Error::other(e.to_string()))?;
    println!("{json}");
    Ok(())
}

pub fn format_agenda_text(screen: &ScheduleScreen, show_fetch_errors: bool) -> String {
    let mut lines = vec![screen.header().to_string(), String::new()];

    if screen.events().is_empty() {
        lines.push(screen.empty_list_message(show_fetch_errors));
    } else {
        for event in screen.events() {
            lines.push(format!("{:<9} {} @ {}", event.time, event.title, event.location));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let Some(cmd) = parts.next() else {
        print!("{text}");
        return Ok(());
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use conf_schedule::calendar::EventRecord;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_options(list: &[&str]) -> CliOptions {
        match parse_args(args(list)) {
            Ok(CliRequest::Run(options)) => options,
            Ok(CliRequest::Help) => panic!("unexpected help request"),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn no_arguments_starts_tui() {
        let options = run_options(&[]);
        assert_eq!(options.mode, CliMode::Tui);
        assert!(options.config_path.is_none());
    }

    #[test]
    fn agenda_with_config_path() {
        let options = run_options(&["--agenda", "--config", "/tmp/conf.toml"]);
        assert_eq!(options.mode, CliMode::Agenda);
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/conf.toml")));
    }

    #[test]
    fn config_without_path_is_rejected() {
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["--config", "--json"])).is_err());
    }

    #[test]
    fn agenda_and_json_are_exclusive() {
        assert!(parse_args(args(&["--agenda", "--json"])).is_err());
    }

    #[test]
    fn unknown_argument_is_rejected() {
        assert!(parse_args(args(&["--sample"])).is_err());
    }

    #[test]
    fn help_flag_requests_usage() {
        assert!(matches!(parse_args(args(&["--help"])), Ok(CliRequest::Help)));
    }

    #[test]
    fn help_lists_every_theme() {
        let help = help_text();

        assert!(help.starts_with(USAGE));
        for name in Theme::available_themes() {
            assert!(help.contains(name), "help text is missing theme {}", name);
        }
    }

    #[test]
    fn agenda_lists_each_event_in_order() {
        let mut screen = ScheduleScreen::new("SHPE Conference 2026");
        screen.settle(Ok(vec![
            EventRecord {
                id: "ev1".to_string(),
                title: "Opening Ceremony".to_string(),
                time: "All Day".to_string(),
                location: "TBD".to_string(),
                description: String::new(),
            },
            EventRecord {
                id: "ev2".to_string(),
                title: "No Title".to_string(),
                time: "02:00 PM".to_string(),
                location: "Hall A".to_string(),
                description: String::new(),
            },
        ]));

        let text = format_agenda_text(&screen, false);

        assert_eq!(
            text,
            "SHPE Conference 2026\n\nAll Day   Opening Ceremony @ TBD\n02:00 PM  No Title @ Hall A\n"
        );
    }

    #[test]
    fn agenda_for_empty_schedule() {
        let mut screen = ScheduleScreen::new("Conf");
        screen.settle(Ok(Vec::new()));

        assert!(format_agenda_text(&screen, false).contains("No events scheduled."));
    }
}
