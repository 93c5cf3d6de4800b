/// Address of the local development server.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "FORANKI_API_URL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_double_slash() {
        let c = ApiConfig::new("http://example.test:9000/");
        assert_eq!(c.url("/cards"), "http://example.test:9000/cards");
        assert_eq!(c.url("cards/3"), "http://example.test:9000/cards/3");
    }

    #[test]
    fn default_is_local_dev_server() {
        assert_eq!(ApiConfig::default().url("cards"), "http://localhost:8000/cards");
    }
}
