use crate::loader::ImageResolver;

const DEFAULT_API_BASE: &str = "https://booksite-backend-production.up.railway.app/api";
const DEFAULT_ASSET_BASE: &str = "https://booksite-backend-production.up.railway.app:8080";

pub const PAGE_SIZE: u32 = 10;
pub const ROOT_ID: &str = "root";

/// Runtime settings. Values are baked in at build time since the browser
/// has no process environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub asset_base: String,
    pub token_key: String,
    pub auth_page: String,
    pub books_page: String,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base: option_env!("BOOKSITE_API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            asset_base: option_env!("BOOKSITE_ASSET_BASE")
                .unwrap_or(DEFAULT_ASSET_BASE)
                .trim_end_matches('/')
                .to_string(),
            token_key: option_env!("BOOKSITE_TOKEN_KEY")
                .unwrap_or("jwt")
                .to_string(),
            auth_page: option_env!("BOOKSITE_AUTH_PAGE")
                .unwrap_or("auth.html")
                .to_string(),
            books_page: option_env!("BOOKSITE_BOOKS_PAGE")
                .unwrap_or("books.html")
                .to_string(),
            page_size: PAGE_SIZE,
        }
    }

    pub fn image_resolver(&self) -> ImageResolver {
        ImageResolver::new(&self.asset_base)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.api_base.ends_with('/'));
        assert!(!config.asset_base.ends_with('/'));
        assert_eq!(config.page_size, 10);
    }
}
