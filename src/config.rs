pub struct Config {
    /// Prefill for the webhook URL field, so a regular who always posts to
    /// the same endpoint doesn't retype it every run. The form still starts
    /// empty when unset.
    pub webhook_url: Option<String>,
}

pub fn get_config() -> Config {
    let webhook_url = std::env::var("WEBHOOK_URL").ok();

    Config { webhook_url }
}
