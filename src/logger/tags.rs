/// Log tags identifying the originating module
///
/// Each tag maps to a --debug-<module> command-line flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Webserver,
    Database,
    CheckIn,
    Badges,
    Places,
    Auth,
    Leaderboard,
    Config,
}

impl LogTag {
    /// Plain uppercase name used in file output and tag formatting
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Webserver => "WEBSERVER",
            LogTag::Database => "DATABASE",
            LogTag::CheckIn => "CHECKIN",
            LogTag::Badges => "BADGES",
            LogTag::Places => "PLACES",
            LogTag::Auth => "AUTH",
            LogTag::Leaderboard => "LEADERBOARD",
            LogTag::Config => "CONFIG",
        }
    }

    /// Key used for --debug-<key> flag matching
    pub fn to_debug_key(&self) -> &'static str {
        match self {
            LogTag::System => "system",
            LogTag::Webserver => "webserver",
            LogTag::Database => "database",
            LogTag::CheckIn => "checkins",
            LogTag::Badges => "badges",
            LogTag::Places => "places",
            LogTag::Auth => "auth",
            LogTag::Leaderboard => "leaderboard",
            LogTag::Config => "config",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
