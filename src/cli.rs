// Command line handling: flags with environment fallbacks, and validation into
// the `Settings` the rest of the tool runs on.

use clap::builder::FalseyValueParser;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_PORT: &str = "443";
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Long flag names, used to accept the single-dash spelling (`-url`).
const LONG_FLAGS: &[&str] = &[
    "url", "port", "scheme", "token", "channel", "config", "noheader", "debug", "version", "help",
];

#[derive(Parser, Debug, Clone)]
#[command(
    name = "mm-channel-setup",
    about = "Utility to quickly add predefined structures to customer channels in Mattermost.",
    disable_version_flag = true
)]
pub struct Cli {
    /// The URL of the Mattermost instance (without the HTTP scheme)
    #[arg(long, env = "MM_URL")]
    pub url: Option<String>,

    /// The TCP port used by Mattermost
    #[arg(long, env = "MM_PORT", default_value = DEFAULT_PORT)]
    pub port: String,

    /// The HTTP scheme to be used (http/https)
    #[arg(long, env = "MM_SCHEME", default_value = DEFAULT_SCHEME)]
    pub scheme: String,

    /// The auth token used to connect to Mattermost
    #[arg(long, env = "MM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// The channel ID to target. (Available from 'Channel Info' screen)
    #[arg(long)]
    pub channel: Option<String>,

    /// Alternative JSON filename
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Don't create a channel header - just add bookmarks
    #[arg(long)]
    pub noheader: bool,

    /// Enable debug output
    #[arg(long, env = "MM_DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,

    /// Show version information and exit
    #[arg(long)]
    pub version: bool,
}

/// Rewrite `-url value` style arguments to `--url value`. Anything after a
/// bare `--` is left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || passthrough {
                return arg;
            }
            let text = match arg.to_str() {
                Some(text) => text.to_string(),
                None => return arg,
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

/// Connection details for the Mattermost server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub url: String,
    pub port: String,
    pub scheme: String,
    pub token: String,
}

impl Connection {
    /// `scheme://url:port`
    pub fn server_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.url, self.port)
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub connection: Connection,
    pub channel_id: String,
    pub config_path: PathBuf,
    pub no_header: bool,
}

fn missing(what: &str, env: &str) -> String {
    format!(
        "{} must be supplied either on the command line or via the {} environment variable",
        what, env
    )
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Cli {
    /// Check that everything needed to reach the server was supplied. On
    /// failure returns one message per missing value.
    pub fn into_settings(self) -> Result<Settings, Vec<String>> {
        let mut problems = Vec::new();

        let url = present(self.url);
        if url.is_none() {
            problems.push(missing("The Mattermost URL", "MM_URL"));
        }
        let scheme = present(Some(self.scheme));
        if scheme.is_none() {
            problems.push(missing("The Mattermost HTTP scheme", "MM_SCHEME"));
        }
        let token = present(self.token);
        if token.is_none() {
            problems.push(missing("The Mattermost auth token", "MM_TOKEN"));
        }
        let channel_id = present(self.channel);
        if channel_id.is_none() {
            problems.push("A Mattermost Channel ID is required to use this utility.".to_string());
        }

        match (url, scheme, token, channel_id) {
            (Some(url), Some(scheme), Some(token), Some(channel_id)) => Ok(Settings {
                connection: Connection {
                    url,
                    port: present(Some(self.port)).unwrap_or_else(|| DEFAULT_PORT.to_string()),
                    scheme,
                    token,
                },
                channel_id,
                config_path: self.config,
                no_header: self.noheader,
            }),
            _ => Err(problems),
        }
    }
}

impl Settings {
    /// Multi-line parameter dump for debug logging. The token is masked.
    pub fn describe(&self) -> String {
        format!(
            "Parameters:\n  MattermostURL={}\n  MattermostPort={}\n  MattermostScheme={}\n  \
             MattermostToken={}\n  ChannelID={}\n  JSON File={}",
            self.connection.url,
            self.connection.port,
            self.connection.scheme,
            mask(&self.connection.token),
            self.channel_id,
            self.config_path.display(),
        )
    }
}

fn mask(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("mm-channel-setup")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    fn parse(list: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(args(list))).unwrap()
    }

    #[test]
    fn single_dash_long_flags_are_accepted() {
        let normalized = normalize_args(args(&[
            "-url", "mm.example.com", "-noheader", "-port=8065", "--token", "t",
        ]));
        let expected = args(&[
            "--url", "mm.example.com", "--noheader", "--port=8065", "--token", "t",
        ]);
        assert_eq!(normalized, expected);
    }

    #[test]
    fn unknown_and_passthrough_args_are_untouched() {
        let normalized = normalize_args(args(&["-x", "--", "-url"]));
        assert_eq!(normalized, args(&["-x", "--", "-url"]));
    }

    #[test]
    fn plain_values_are_left_alone() {
        let normalized = normalize_args(args(&["--channel", "abc123"]));
        assert_eq!(normalized, args(&["--channel", "abc123"]));
    }

    #[test]
    fn full_command_line_builds_settings() {
        let settings = parse(&[
            "-url",
            "mm.example.com",
            "-token",
            "secret-token",
            "-channel",
            "chan1",
            "-config",
            "team.json",
            "-noheader",
        ])
        .into_settings()
        .unwrap();

        assert_eq!(settings.connection.server_url(), "https://mm.example.com:443");
        assert_eq!(settings.channel_id, "chan1");
        assert_eq!(settings.config_path, PathBuf::from("team.json"));
        assert!(settings.no_header);
    }

    #[test]
    fn missing_values_are_all_reported() {
        let cli = Cli {
            url: None,
            port: DEFAULT_PORT.into(),
            scheme: String::new(),
            token: Some("  ".into()),
            channel: None,
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            noheader: false,
            debug: false,
            version: false,
        };
        let problems = cli.into_settings().unwrap_err();
        assert_eq!(problems.len(), 4);
        assert!(problems[0].contains("MM_URL"));
        assert!(problems[3].contains("Channel ID"));
    }

    #[test]
    fn describe_masks_token() {
        let settings = parse(&["--url", "mm", "--token", "abcdefghijkl", "--channel", "c"])
            .into_settings()
            .unwrap();
        let text = settings.describe();
        assert!(text.contains("MattermostToken=abcd****"));
        assert!(!text.contains("abcdefghijkl"));
        assert_eq!(mask("short"), "****");
    }
}
