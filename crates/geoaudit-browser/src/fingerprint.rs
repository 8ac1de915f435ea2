use geoaudit_core::BrowserConfig;
use rand::seq::SliceRandom;

/// Common desktop user agents, so trivial bot filters treat us as a browser.
pub const DESKTOP_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
];

/// Identity presented by the headless browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self {
            user_agent: DESKTOP_USER_AGENTS[0].to_string(),
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

impl Fingerprint {
    /// Pick one of the desktop user agents at random.
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();
        let user_agent = DESKTOP_USER_AGENTS
            .choose(&mut rng)
            .copied()
            .unwrap_or(DESKTOP_USER_AGENTS[0]);

        Self {
            user_agent: user_agent.to_string(),
            ..Self::default()
        }
    }

    /// Fingerprint for the configured window, honoring a fixed user agent if set.
    pub fn from_config(config: &BrowserConfig) -> Self {
        let base = match &config.user_agent {
            Some(agent) => Self {
                user_agent: agent.clone(),
                ..Self::default()
            },
            None => Self::randomized(),
        };

        Self {
            viewport_width: config.window_width,
            viewport_height: config.window_height,
            ..base
        }
    }
}
