//! Backend adapters built from configuration

use std::sync::Arc;
use std::time::Duration;

use lorry_hire_infra::ApiClient;
use lorry_hire_types::Result;

use crate::config::Config;
use crate::service::ChallanFormService;

/// Open the REST backend configured in `config`
pub fn open_backend(config: &Config) -> Result<ApiClient> {
    ApiClient::with_options(
        &config.api_base_url,
        config.api_token.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
}

/// Form service scoped to the configured company, branch and financial year
pub fn open_form_service(config: &Config) -> Result<ChallanFormService<ApiClient>> {
    let ctx = config.session_context()?;
    let backend = Arc::new(open_backend(config)?);
    Ok(ChallanFormService::new(backend, ctx).with_search_settings(
        config.search_min_chars,
        Duration::from_millis(config.search_debounce_ms),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_backend_rejects_bad_url() {
        let config = Config {
            api_base_url: "localhost:3000".to_string(),
            ..Config::default()
        };
        assert!(open_backend(&config).is_err());
    }

    #[test]
    fn test_form_service_needs_context() {
        assert!(open_form_service(&Config::default()).is_err());

        let config = Config {
            company_id: Some(1),
            branch_id: Some(2),
            financial_year_id: Some(3),
            ..Config::default()
        };
        let service = open_form_service(&config).unwrap();
        assert_eq!(service.context().branch_id, 2);
    }
}
