pub mod env {
    pub const ENV_PREFIX: &str = "WARDEN";
    pub const ENV_SEPARATOR: &str = "__";
}

pub mod files {
    pub const SETTINGS_FILE: &str = "warden.json";
    pub const SETTINGS_DIR_FILE: &str = "config/warden.json";
}

pub mod defaults {
    pub const CACHE_TTL_SECONDS: u64 = 300;
    pub const ARGON2_MEMORY_COST_KIB: u32 = 15000;
    pub const ARGON2_TIME_COST: u32 = 2;
    pub const ARGON2_PARALLELISM: u32 = 1;
    pub const MINIMUM_SUCCESSES: usize = 1;
    pub const LOG_FILTER: &str = "info";
}
