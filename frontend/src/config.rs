pub struct Config {
    pub api_base_url: &'static str,
    pub vote_error_ms: u32,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            api_base_url: "/api",
            vote_error_ms: 4_000,
        }
    }
}

pub const CONFIG: Config = Config::new();
