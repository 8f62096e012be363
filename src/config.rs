use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub api_base_url: String,
    pub api_key: String,
    pub admin_token: String,
    pub page_size: usize,
    pub revalidate_secs: u64,
    pub watermark_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_url: env::var("BOOKING_API_URL")
                .unwrap_or_else(|_| "https://api.astrobarta.com".to_string()),
            api_key: env::var("BOOKING_API_KEY").unwrap_or_default(),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            revalidate_secs: env::var("REVALIDATE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            watermark_path: env::var("WATERMARK_PATH")
                .unwrap_or_else(|_| "last_seen_booking.txt".to_string()),
        }
    }
}
